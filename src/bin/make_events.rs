use std::path::PathBuf;

use clap::Parser;

use spillbuild::event::{Event, FourVector, HitSegment, PrimaryVertex, Trajectory, TrajectoryPoint};
use spillbuild::random::{RandomSource, SpillRng};
use spillbuild::source::EventFileWriter;
use spillbuild::SpillError;

#[derive(Parser)]
#[command(name = "make_events")]
#[command(about = "Generate a synthetic single-interaction event file", long_about = None)]
struct Cli {
    /// Output event file
    out_file: PathBuf,
    /// Number of events to generate
    #[arg(long, default_value_t = 100)]
    count: usize,
    /// Identifier of the first event; later events count up from it
    #[arg(long, default_value_t = 0)]
    first_id: i64,
    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,
}

/// One interaction with a handful of tracks and hits, all time fields in
/// the frame of its primary vertex.
fn synth_event(id: i64, rng: &mut SpillRng) -> Event {
    let vertex_time = rng.uniform() * 10.0;
    let vertex = FourVector::new(
        (rng.uniform() - 0.5) * 600.0,
        (rng.uniform() - 0.5) * 200.0,
        (rng.uniform() - 0.5) * 100.0,
        vertex_time,
    );

    let mut event = Event::new(id);
    event.primaries.push(PrimaryVertex { position: vertex });

    let tracks = 2 + rng.integer(3);
    for track in 0..tracks {
        let steps = 3 + rng.integer(3);
        let mut points = Vec::with_capacity(steps as usize);
        for step in 0..steps {
            let flight = step as f64 * (0.2 + rng.uniform());
            points.push(TrajectoryPoint {
                position: FourVector::new(
                    vertex.x + step as f64 * 5.0,
                    vertex.y + step as f64 * 2.0,
                    vertex.z + step as f64 * 20.0,
                    vertex_time + flight,
                ),
            });
        }
        event.trajectories.push(Trajectory {
            track_id: track as i32 + 1,
            parent_id: -1,
            pdg_code: if track % 2 == 0 { 13 } else { 2212 },
            points,
        });
    }

    for detector in ["ArgonCube", "MuonTagger"] {
        let hits = 1 + rng.integer(4);
        let mut segments = Vec::with_capacity(hits as usize);
        for _ in 0..hits {
            let start = vertex_time + rng.uniform() * 3.0;
            let x = (rng.uniform() - 0.5) * 600.0;
            segments.push(HitSegment {
                start: FourVector::new(x, vertex.y, vertex.z, start),
                stop: FourVector::new(x + 1.0, vertex.y, vertex.z + 2.0, start + 0.1),
                energy_deposit: rng.uniform() * 5.0,
            });
        }
        event.segment_detectors.insert(detector.to_string(), segments);
    }

    event
}

fn main() -> Result<(), SpillError> {
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => SpillRng::seeded(seed),
        None => SpillRng::from_entropy(),
    };

    let mut writer = EventFileWriter::create(&cli.out_file)?;
    for i in 0..cli.count {
        writer.append(&synth_event(cli.first_id + i as i64, &mut rng))?;
    }
    let written = writer.finish()?;

    println!(
        "[make_events] wrote {} event(s) to {}",
        written,
        cli.out_file.display()
    );

    Ok(())
}
