use std::path::{Path, PathBuf};

use clap::Parser;

use spillbuild::beam::BeamTiming;
use spillbuild::builder::{build_spills, BuildConfig};
use spillbuild::planner::events_per_spill;
use spillbuild::random::SpillRng;
use spillbuild::sink::SpillArchive;
use spillbuild::source::{EventFile, SourceStream};
use spillbuild::SpillError;

#[derive(Parser)]
#[command(name = "spillbuild")]
#[command(about = "Overlay single-interaction event files into full beam spills", long_about = None)]
struct Cli {
    /// Beam single-interaction event file
    beam_file: PathBuf,
    /// Rock background single-interaction event file
    rock_file: PathBuf,
    /// Output spill archive directory
    out_dir: PathBuf,
    /// Exposure of the beam file, protons on target
    #[arg(long, default_value_t = 1.024e19)]
    beam_pot: f64,
    /// Exposure of the rock file, protons on target
    #[arg(long, default_value_t = 1.024e19)]
    rock_pot: f64,
    /// Nominal exposure of one spill, protons on target
    #[arg(long, default_value_t = 6.5e13)]
    spill_pot: f64,
    /// Seed the random stream for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn print_source_summary(path: &Path, count: usize, pot: f64, spill_pot: f64) {
    println!("[spillbuild] file: {}", path.display());
    println!("[spillbuild]     events: {}", count);
    println!("[spillbuild]     number of spills: {}", pot / spill_pot);
    println!(
        "[spillbuild]     events per spill: {}",
        events_per_spill(count, pot, spill_pot)
    );
}

fn main() -> Result<(), SpillError> {
    let cli = Cli::parse();

    let config = BuildConfig {
        beam_pot: cli.beam_pot,
        rock_pot: cli.rock_pot,
        spill_pot: cli.spill_pot,
        beam: BeamTiming::default(),
    };
    config.validate()?;

    let beam_source = EventFile::open(&cli.beam_file)?;
    let rock_source = EventFile::open(&cli.rock_file)?;

    print_source_summary(&cli.beam_file, beam_source.count(), cli.beam_pot, cli.spill_pot);
    print_source_summary(&cli.rock_file, rock_source.count(), cli.rock_pot, cli.spill_pot);

    let mut rng = match cli.seed {
        Some(seed) => SpillRng::seeded(seed),
        None => SpillRng::from_entropy(),
    };

    let mut archive = SpillArchive::create(&cli.out_dir)?;
    let summary = build_spills(beam_source, rock_source, &mut archive, &mut rng, &config)?;
    archive.write_summary(&summary)?;

    println!(
        "[spillbuild] built {} spill(s), {} events ({} beam, {} rock)",
        summary.spills, summary.total_events, summary.beam_events, summary.rock_events
    );
    println!("[spillbuild] archive written to {}", cli.out_dir.display());

    Ok(())
}
