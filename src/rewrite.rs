use crate::event::Event;

/// Move an event to its assigned spill time, in place.
///
/// The reference is the time of the first primary vertex, captured before
/// any mutation. Every primary vertex is set to `new_time` directly (the
/// vertices of one interaction are treated as simultaneous), while
/// trajectory points and hit segments keep their offsets against the
/// reference. Because the first vertex carries the new time afterwards,
/// rewriting is idempotent under composition: shifting to `t1` and then to
/// `t2` equals shifting the original event straight to `t2`.
pub fn shift_event_times(event: &mut Event, new_time: f64) {
    let reference = event.reference_time();

    for vertex in &mut event.primaries {
        vertex.position.t = new_time;
    }

    for trajectory in &mut event.trajectories {
        for point in &mut trajectory.points {
            point.position.t = new_time + (point.position.t - reference);
        }
    }

    for segments in event.segment_detectors.values_mut() {
        for hit in segments {
            hit.start.t = new_time + (hit.start.t - reference);
            hit.stop.t = new_time + (hit.stop.t - reference);
        }
    }
}
