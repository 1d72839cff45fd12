use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;

use spillbuild::sink::SpillArchive;
use spillbuild::source::{EventFile, SourceStream};
use spillbuild::SpillError;

#[derive(Parser)]
#[command(name = "inspect_spills")]
#[command(about = "Print the composition of a spill archive", long_about = None)]
struct Cli {
    /// Spill archive directory
    archive: PathBuf,
}

fn main() -> Result<(), SpillError> {
    let cli = Cli::parse();

    let map = SpillArchive::read_map(&cli.archive)?;
    let mut events_file = EventFile::open(&SpillArchive::events_path(&cli.archive))?;

    let mut events = Vec::with_capacity(events_file.count());
    for position in 0..events_file.count() {
        events.push(events_file.read(position)?);
    }

    println!("[inspect_spills] archive: {}", cli.archive.display());
    println!(
        "[inspect_spills] {} event(s), {} mapped",
        events.len(),
        map.len()
    );

    // Emission order groups events by spill already.
    for (spill, group) in &events
        .iter()
        .group_by(|event| map.get(&event.id).copied().unwrap_or(0))
    {
        let group: Vec<_> = group.collect();
        let beam = group.iter().filter(|e| e.id >= 0).count();
        let rock = group.len() - beam;

        let times: Vec<f64> = group
            .iter()
            .filter_map(|e| e.primaries.first().map(|v| v.position.t))
            .collect();

        if times.is_empty() {
            println!(
                "[inspect_spills] spill {:>4}: {:>4} events ({} beam, {} rock)",
                spill,
                group.len(),
                beam,
                rock
            );
        } else {
            let lo = times.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            println!(
                "[inspect_spills] spill {:>4}: {:>4} events ({} beam, {} rock), t {:.1}..{:.1} ns",
                spill,
                group.len(),
                beam,
                rock,
                lo,
                hi
            );
        }
    }

    Ok(())
}
