use std::collections::BTreeMap;

use bincode::{Decode, Encode};

#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode)]
pub struct FourVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: f64,
}

impl FourVector {
    pub fn new(x: f64, y: f64, z: f64, t: f64) -> Self {
        FourVector { x, y, z, t }
    }
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct PrimaryVertex {
    pub position: FourVector,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct TrajectoryPoint {
    pub position: FourVector,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Trajectory {
    pub track_id: i32,
    pub parent_id: i32,
    pub pdg_code: i32,
    pub points: Vec<TrajectoryPoint>,
}

#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct HitSegment {
    pub start: FourVector,
    pub stop: FourVector,
    pub energy_deposit: f64,
}

/// One simulated interaction. All time fields of a freshly produced event
/// share a single reference frame: the time of its first primary vertex.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Event {
    /// Unique within one source stream. Must be non-negative at read time;
    /// merged output uses the remapped identifier space instead.
    pub id: i64,
    pub primaries: Vec<PrimaryVertex>,
    pub trajectories: Vec<Trajectory>,
    pub segment_detectors: BTreeMap<String, Vec<HitSegment>>,
}

impl Event {
    pub fn new(id: i64) -> Self {
        Event {
            id,
            primaries: Vec::new(),
            trajectories: Vec::new(),
            segment_detectors: BTreeMap::new(),
        }
    }

    /// Time of the first primary vertex, the event's reference time.
    /// Vertex-less events fall back to 0.
    pub fn reference_time(&self) -> f64 {
        self.primaries.first().map(|v| v.position.t).unwrap_or(0.0)
    }
}
