use crate::random::RandomSource;

/// Mean number of records a source contributes to one spill, given the
/// source's total exposure and the nominal exposure of a single spill.
pub fn events_per_spill(event_count: usize, source_pot: f64, spill_pot: f64) -> f64 {
    event_count as f64 / (source_pot / spill_pot)
}

/// Per-spill record counts drawn by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpillPlan {
    pub beam: usize,
    pub rock: usize,
}

impl SpillPlan {
    /// A plan fits only if both sources can still supply their full draw.
    /// Partial spills are never assembled; a plan that does not fit ends
    /// the run and its counts are discarded.
    pub fn fits(&self, beam_remaining: usize, rock_remaining: usize) -> bool {
        self.beam <= beam_remaining && self.rock <= rock_remaining
    }

    pub fn total(&self) -> usize {
        self.beam + self.rock
    }
}

/// Draws per-spill record counts, one independent Poisson per source.
pub struct SpillPlanner {
    mean_beam: f64,
    mean_rock: f64,
}

impl SpillPlanner {
    pub fn new(mean_beam: f64, mean_rock: f64) -> Self {
        SpillPlanner { mean_beam, mean_rock }
    }

    pub fn mean_beam(&self) -> f64 {
        self.mean_beam
    }

    pub fn mean_rock(&self) -> f64 {
        self.mean_rock
    }

    pub fn draw<R: RandomSource>(&self, rng: &mut R) -> SpillPlan {
        SpillPlan {
            beam: rng.poisson(self.mean_beam),
            rock: rng.poisson(self.mean_rock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SpillRng;

    #[test]
    fn test_events_per_spill_normalizes_by_exposure() {
        // 1000 events over 1e19 POT at 6.5e13 POT per spill.
        let mean = events_per_spill(1000, 1.0e19, 6.5e13);
        assert!((mean - 1000.0 / (1.0e19 / 6.5e13)).abs() < 1e-12);

        // A source covering exactly one spill's exposure yields all events.
        assert_eq!(events_per_spill(7, 6.5e13, 6.5e13), 7.0);
    }

    #[test]
    fn test_fits_requires_both_sources() {
        let plan = SpillPlan { beam: 3, rock: 2 };
        assert!(plan.fits(3, 2));
        assert!(plan.fits(10, 10));
        assert!(!plan.fits(2, 2));
        assert!(!plan.fits(3, 1));
        assert_eq!(plan.total(), 5);
    }

    #[test]
    fn test_zero_mean_source_draws_nothing() {
        let planner = SpillPlanner::new(0.0, 5.0);
        let mut rng = SpillRng::seeded(5);
        for _ in 0..100 {
            assert_eq!(planner.draw(&mut rng).beam, 0);
        }
    }

    #[test]
    fn test_draws_track_their_means() {
        let planner = SpillPlanner::new(5.0, 2.0);
        let mut rng = SpillRng::seeded(6);

        let draws = 10_000;
        let mut beam_total = 0;
        let mut rock_total = 0;
        for _ in 0..draws {
            let plan = planner.draw(&mut rng);
            beam_total += plan.beam;
            rock_total += plan.rock;
        }

        let beam_mean = beam_total as f64 / draws as f64;
        let rock_mean = rock_total as f64 / draws as f64;
        assert!((4.8..5.2).contains(&beam_mean), "beam mean {}", beam_mean);
        assert!((1.9..2.1).contains(&rock_mean), "rock mean {}", rock_mean);
    }
}
