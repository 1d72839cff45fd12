use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spillbuild::assembler::SpillAssembler;
use spillbuild::beam::BeamTiming;
use spillbuild::planner::SpillPlan;
use spillbuild::random::SpillRng;

fn timing_sampler_bench(c: &mut Criterion) {
    let beam = BeamTiming::default();
    c.bench_function("beam_sample", |b| {
        let mut rng = SpillRng::seeded(1);
        b.iter(|| black_box(beam.sample(&mut rng)))
    });
}

fn draw_times_bench(c: &mut Criterion) {
    let assembler = SpillAssembler::new(BeamTiming::default());
    c.bench_function("draw_times_spill", |b| {
        let mut rng = SpillRng::seeded(2);
        b.iter(|| black_box(assembler.draw_times(SpillPlan { beam: 50, rock: 20 }, &mut rng)))
    });
}

criterion_group!(benches, timing_sampler_bench, draw_times_bench);
criterion_main!(benches);
