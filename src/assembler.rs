use itertools::repeat_n;

use crate::beam::BeamTiming;
use crate::cursor::StreamCursor;
use crate::error::SpillError;
use crate::planner::SpillPlan;
use crate::random::RandomSource;
use crate::remap::{final_identifier, MappingTable};
use crate::rewrite::shift_event_times;
use crate::sink::OutputSink;
use crate::source::{SourceStream, SourceTag};

/// One interaction time with the source it will be filled from. Lives only
/// for the duration of a single spill.
#[derive(Debug, Clone, Copy)]
pub struct TaggedTime {
    pub time: f64,
    pub tag: SourceTag,
}

/// Builds one spill at a time: draws the spill's interaction times, then
/// walks them in chronological order pulling the next untouched record from
/// whichever source each slot belongs to.
pub struct SpillAssembler {
    beam: BeamTiming,
}

impl SpillAssembler {
    pub fn new(beam: BeamTiming) -> Self {
        SpillAssembler { beam }
    }

    /// Draw the spill's interaction times, beam slots first, then sort
    /// ascending. The sort is stable, so ties keep their draw order.
    pub fn draw_times<R: RandomSource>(&self, plan: SpillPlan, rng: &mut R) -> Vec<TaggedTime> {
        let mut times: Vec<TaggedTime> = repeat_n(SourceTag::Beam, plan.beam)
            .chain(repeat_n(SourceTag::Rock, plan.rock))
            .map(|tag| TaggedTime {
                time: self.beam.sample(rng),
                tag,
            })
            .collect();
        times.sort_by(|a, b| a.time.total_cmp(&b.time));
        times
    }

    /// Assemble and emit one spill. Each slot pulls the next record from
    /// its source, remaps its identifier into the merged space, registers
    /// the spill assignment, moves the record to its assigned time, and
    /// forwards it to the sink. Returns the number of records emitted.
    pub fn assemble<A, B, O, R>(
        &self,
        spill_number: u32,
        plan: SpillPlan,
        rng: &mut R,
        beam_cursor: &mut StreamCursor<A>,
        rock_cursor: &mut StreamCursor<B>,
        mapping: &mut MappingTable,
        sink: &mut O,
    ) -> Result<usize, SpillError>
    where
        A: SourceStream,
        B: SourceStream,
        O: OutputSink,
        R: RandomSource,
    {
        let times = self.draw_times(plan, rng);

        for slot in &times {
            let mut event = match slot.tag {
                SourceTag::Beam => beam_cursor.next()?,
                SourceTag::Rock => rock_cursor.next()?,
            };

            let final_id = final_identifier(event.id, slot.tag);
            mapping.register(final_id, spill_number)?;
            event.id = final_id;
            shift_event_times(&mut event, slot.time);

            sink.append(event, final_id, spill_number)?;
        }

        Ok(times.len())
    }
}
