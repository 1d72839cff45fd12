use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::builder::RunSummary;
use crate::error::SpillError;
use crate::event::Event;
use crate::remap::MappingTable;

/// Destination of the merged output. `append` is called once per record in
/// emission order (spill order, ascending assigned time within a spill);
/// `finalize` exactly once after the last spill, with the completed
/// identifier-to-spill table.
pub trait OutputSink {
    fn append(&mut self, event: Event, final_id: i64, spill_number: u32) -> Result<(), SpillError>;
    fn finalize(&mut self, mapping: &MappingTable) -> Result<(), SpillError>;
}

/// On-disk spill archive: a directory holding the merged record stream and
/// its side tables.
///
/// - `events.bin`: consecutive bincode-encoded events, final identifiers
///   and rewritten times already applied, in emission order.
/// - `event_spill_map.json`: final identifier to spill number, written once
///   at finalize.
/// - `summary.json`: run totals, written by the driver after a clean run.
pub struct SpillArchive {
    dir: PathBuf,
    writer: BufWriter<File>,
    appended: usize,
    finalized: bool,
}

impl SpillArchive {
    pub fn create(dir: &Path) -> Result<Self, SpillError> {
        fs::create_dir_all(dir).map_err(SpillError::Io)?;
        let file = File::create(Self::events_path(dir)).map_err(SpillError::Io)?;
        Ok(SpillArchive {
            dir: dir.to_path_buf(),
            writer: BufWriter::new(file),
            appended: 0,
            finalized: false,
        })
    }

    pub fn events_path(dir: &Path) -> PathBuf {
        dir.join("events.bin")
    }

    pub fn map_path(dir: &Path) -> PathBuf {
        dir.join("event_spill_map.json")
    }

    pub fn summary_path(dir: &Path) -> PathBuf {
        dir.join("summary.json")
    }

    pub fn appended(&self) -> usize {
        self.appended
    }

    pub fn write_summary(&self, summary: &RunSummary) -> Result<(), SpillError> {
        let file = File::create(Self::summary_path(&self.dir)).map_err(SpillError::Io)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush().map_err(SpillError::Io)?;
        Ok(())
    }

    /// Load a previously finalized mapping table file.
    pub fn read_map(dir: &Path) -> Result<BTreeMap<i64, u32>, SpillError> {
        let file = File::open(Self::map_path(dir)).map_err(SpillError::Io)?;
        let map = serde_json::from_reader(file)?;
        Ok(map)
    }
}

impl OutputSink for SpillArchive {
    fn append(&mut self, event: Event, _final_id: i64, _spill_number: u32) -> Result<(), SpillError> {
        let config = bincode::config::standard();
        bincode::encode_into_std_write(&event, &mut self.writer, config)?;
        self.appended += 1;
        Ok(())
    }

    fn finalize(&mut self, mapping: &MappingTable) -> Result<(), SpillError> {
        if self.finalized {
            return Err(SpillError::Stream(
                "spill archive finalized twice".to_string(),
            ));
        }
        self.writer.flush().map_err(SpillError::Io)?;

        let map: BTreeMap<i64, u32> = mapping.sorted_entries().into_iter().collect();
        let file = File::create(Self::map_path(&self.dir)).map_err(SpillError::Io)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &map)?;
        writer.flush().map_err(SpillError::Io)?;

        self.finalized = true;
        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<(Event, i64, u32)>,
    pub mapping: Vec<(i64, u32)>,
    pub finalized: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink::default()
    }
}

impl OutputSink for MemorySink {
    fn append(&mut self, event: Event, final_id: i64, spill_number: u32) -> Result<(), SpillError> {
        self.events.push((event, final_id, spill_number));
        Ok(())
    }

    fn finalize(&mut self, mapping: &MappingTable) -> Result<(), SpillError> {
        if self.finalized {
            return Err(SpillError::Stream("sink finalized twice".to_string()));
        }
        self.mapping = mapping.sorted_entries();
        self.finalized = true;
        Ok(())
    }
}
