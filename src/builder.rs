use serde::{Deserialize, Serialize};

use crate::assembler::SpillAssembler;
use crate::beam::BeamTiming;
use crate::cursor::StreamCursor;
use crate::error::SpillError;
use crate::planner::{events_per_spill, SpillPlanner};
use crate::random::RandomSource;
use crate::remap::MappingTable;
use crate::sink::OutputSink;
use crate::source::{SourceStream, SourceTag};

#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub beam_pot: f64,
    pub rock_pot: f64,
    pub spill_pot: f64,
    pub beam: BeamTiming,
}

impl BuildConfig {
    pub fn new(beam_pot: f64, rock_pot: f64, spill_pot: f64) -> Self {
        BuildConfig {
            beam_pot,
            rock_pot,
            spill_pot,
            beam: BeamTiming::default(),
        }
    }

    pub fn validate(&self) -> Result<(), SpillError> {
        let exposures = [
            ("beam POT", self.beam_pot),
            ("rock POT", self.rock_pot),
            ("spill POT", self.spill_pot),
        ];
        for (name, value) in exposures {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpillError::Config(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub spills: u32,
    pub beam_events: usize,
    pub rock_events: usize,
    pub total_events: usize,
}

/// Run the whole merge: plan spills until either source would run dry, pull
/// and rewrite records spill by spill, and finalize the sink with the
/// completed mapping table.
///
/// A spill whose drawn counts exceed what either source still holds ends
/// the run; its counts are discarded and nothing partial is written. The
/// unread tail of each source is simply never emitted.
pub fn build_spills<A, B, O, R>(
    beam_source: A,
    rock_source: B,
    sink: &mut O,
    rng: &mut R,
    config: &BuildConfig,
) -> Result<RunSummary, SpillError>
where
    A: SourceStream,
    B: SourceStream,
    O: OutputSink,
    R: RandomSource,
{
    config.validate()?;
    if beam_source.count() == 0 {
        return Err(SpillError::Config("beam source contains no events".to_string()));
    }
    if rock_source.count() == 0 {
        return Err(SpillError::Config("rock source contains no events".to_string()));
    }

    let planner = SpillPlanner::new(
        events_per_spill(beam_source.count(), config.beam_pot, config.spill_pot),
        events_per_spill(rock_source.count(), config.rock_pot, config.spill_pot),
    );
    if !planner.mean_beam().is_finite() || !planner.mean_rock().is_finite() {
        return Err(SpillError::Config(format!(
            "events per spill must be finite, got {} beam and {} rock",
            planner.mean_beam(),
            planner.mean_rock()
        )));
    }
    let assembler = SpillAssembler::new(config.beam.clone());

    let mut beam_cursor = StreamCursor::new(beam_source, SourceTag::Beam);
    let mut rock_cursor = StreamCursor::new(rock_source, SourceTag::Rock);
    let mut mapping = MappingTable::new();

    let mut spill_number: u32 = 0;
    loop {
        let plan = planner.draw(rng);
        if !plan.fits(beam_cursor.remaining(), rock_cursor.remaining()) {
            break;
        }

        spill_number += 1;
        println!("[spillbuild] working on spill {}", spill_number);

        assembler.assemble(
            spill_number,
            plan,
            rng,
            &mut beam_cursor,
            &mut rock_cursor,
            &mut mapping,
            sink,
        )?;
    }

    sink.finalize(&mapping)?;

    Ok(RunSummary {
        spills: spill_number,
        beam_events: beam_cursor.consumed(),
        rock_events: rock_cursor.consumed(),
        total_events: beam_cursor.consumed() + rock_cursor.consumed(),
    })
}
