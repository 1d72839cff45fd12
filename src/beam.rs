use crate::random::RandomSource;

/// Micro-timing structure of one beam spill. Times are in nanoseconds.
///
/// Defaults describe the LBNF/NuMI profile: 6 batches of 84 bunches, one
/// bunch every 19 ns, batches 1680 ns apart. The outermost two bunches on
/// each side of a batch carry roughly half the intensity, modeled by a 50%
/// rejection on those indices.
#[derive(Debug, Clone)]
pub struct BeamTiming {
    pub batches: u32,
    pub bunches_per_batch: u32,
    pub bunch_width: f64,
    pub batch_spacing: f64,
    pub edge_rejection: f64,
}

impl Default for BeamTiming {
    fn default() -> Self {
        BeamTiming {
            batches: 6,
            bunches_per_batch: 84,
            bunch_width: 19.0,
            batch_spacing: 1680.0,
            edge_rejection: 0.5,
        }
    }
}

impl BeamTiming {
    /// Upper bound on the times `sample` can return.
    pub fn spill_duration(&self) -> f64 {
        (self.batches - 1) as f64 * self.batch_spacing
            + (self.bunches_per_batch - 1) as f64 * self.bunch_width
            + 1.0
    }

    fn is_edge_bunch(&self, bunch: u32) -> bool {
        bunch <= 1 || bunch + 2 >= self.bunches_per_batch
    }

    /// Draw one interaction time within a spill.
    ///
    /// Rejection sampling over the bunch grid: pick a batch, pick a bunch,
    /// and if the bunch is one of the four edge bunches discard the draw
    /// with probability `edge_rejection` and start over. The rejection
    /// uniform is only consumed for edge bunches. An accepted draw lands
    /// uniformly inside the first nanosecond of its bunch window.
    pub fn sample<R: RandomSource>(&self, rng: &mut R) -> f64 {
        loop {
            let batch = rng.integer(self.batches);
            let bunch = rng.integer(self.bunches_per_batch);
            if self.is_edge_bunch(bunch) && rng.uniform() < self.edge_rejection {
                continue;
            }
            return rng.uniform()
                + bunch as f64 * self.bunch_width
                + batch as f64 * self.batch_spacing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SpillRng;
    use std::collections::VecDeque;

    struct ScriptedRandom {
        uniforms: VecDeque<f64>,
        integers: VecDeque<u32>,
    }

    impl RandomSource for ScriptedRandom {
        fn uniform(&mut self) -> f64 {
            self.uniforms.pop_front().expect("ran out of scripted uniforms")
        }

        fn integer(&mut self, n: u32) -> u32 {
            let v = self.integers.pop_front().expect("ran out of scripted integers");
            assert!(v < n, "scripted integer {} out of range [0, {})", v, n);
            v
        }

        fn poisson(&mut self, _mean: f64) -> usize {
            unreachable!("timing sampler never draws poisson")
        }
    }

    #[test]
    fn test_samples_land_in_bunch_windows() {
        let beam = BeamTiming::default();
        let mut rng = SpillRng::seeded(11);

        for _ in 0..10_000 {
            let t = beam.sample(&mut rng);
            assert!(t >= 0.0 && t < beam.spill_duration());

            let batch = (t / beam.batch_spacing).floor();
            let remainder = t - batch * beam.batch_spacing;
            let bunch = (remainder / beam.bunch_width).floor();
            let frac = remainder - bunch * beam.bunch_width;

            assert!((batch as u32) < beam.batches);
            assert!((bunch as u32) < beam.bunches_per_batch);
            assert!(frac >= 0.0 && frac < 1.0, "time {} outside its bunch window", t);
        }
    }

    #[test]
    fn test_edge_bunch_draw_is_resampled() {
        let beam = BeamTiming::default();
        // First draw hits bunch 0 and fails its rejection check (0.3 < 0.5);
        // second draw hits interior bunch 10 and is accepted.
        let mut rng = ScriptedRandom {
            integers: VecDeque::from([0, 0, 0, 10]),
            uniforms: VecDeque::from([0.3, 0.25]),
        };

        let t = beam.sample(&mut rng);
        assert_eq!(t, 0.25 + 10.0 * 19.0);
    }

    #[test]
    fn test_edge_bunch_draw_can_survive() {
        let beam = BeamTiming::default();
        // Edge bunch 83, rejection uniform 0.9 >= 0.5, so the draw stands.
        let mut rng = ScriptedRandom {
            integers: VecDeque::from([2, 83]),
            uniforms: VecDeque::from([0.9, 0.5]),
        };

        let t = beam.sample(&mut rng);
        assert_eq!(t, 0.5 + 83.0 * 19.0 + 2.0 * 1680.0);
    }

    #[test]
    fn test_interior_bunch_skips_rejection_uniform() {
        let beam = BeamTiming::default();
        // Only one uniform scripted: the in-bunch fraction. An interior
        // bunch must not consume a rejection uniform.
        let mut rng = ScriptedRandom {
            integers: VecDeque::from([1, 42]),
            uniforms: VecDeque::from([0.125]),
        };

        let t = beam.sample(&mut rng);
        assert_eq!(t, 0.125 + 42.0 * 19.0 + 1680.0);
        assert!(rng.uniforms.is_empty());
    }

    #[test]
    fn test_edge_bunches_are_the_outer_two_on_each_side() {
        let beam = BeamTiming::default();
        assert!(beam.is_edge_bunch(0));
        assert!(beam.is_edge_bunch(1));
        assert!(!beam.is_edge_bunch(2));
        assert!(!beam.is_edge_bunch(81));
        assert!(beam.is_edge_bunch(82));
        assert!(beam.is_edge_bunch(83));
    }
}
