use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::SpillError;
use crate::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceTag {
    Beam,
    Rock,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTag::Beam => write!(f, "beam"),
            SourceTag::Rock => write!(f, "rock"),
        }
    }
}

/// A read-only stream of single-interaction events, opened before the run
/// starts. Positions are consumed in order by a cursor; implementations may
/// reject anything else.
pub trait SourceStream {
    fn count(&self) -> usize;
    fn read(&mut self, position: usize) -> Result<Event, SpillError>;
}

/// File of consecutive bincode-encoded events.
///
/// Opening makes one counting pass over the file, then reopens it for the
/// sequential reads. Reads never seek and never revisit a position.
pub struct EventFile {
    path: PathBuf,
    reader: BufReader<File>,
    count: usize,
    next_position: usize,
}

impl EventFile {
    pub fn open(path: &Path) -> Result<Self, SpillError> {
        let file = File::open(path).map_err(SpillError::Io)?;
        let mut reader = BufReader::new(file);
        let config = bincode::config::standard();

        let mut count = 0;
        loop {
            match bincode::decode_from_std_read::<Event, _, _>(&mut reader, config) {
                Ok(_) => count += 1,
                Err(bincode::error::DecodeError::Io { inner, .. })
                    if inner.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(err) => return Err(SpillError::Deserialization(Box::new(err))),
            }
        }

        let file = File::open(path).map_err(SpillError::Io)?;
        Ok(EventFile {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            count,
            next_position: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceStream for EventFile {
    fn count(&self) -> usize {
        self.count
    }

    fn read(&mut self, position: usize) -> Result<Event, SpillError> {
        if position != self.next_position {
            return Err(SpillError::Stream(format!(
                "non-sequential read of {} at position {} (expected {})",
                self.path.display(),
                position,
                self.next_position
            )));
        }
        if position >= self.count {
            return Err(SpillError::Stream(format!(
                "read past the end of {} ({} events)",
                self.path.display(),
                self.count
            )));
        }

        let config = bincode::config::standard();
        let event = bincode::decode_from_std_read::<Event, _, _>(&mut self.reader, config)?;
        self.next_position += 1;
        Ok(event)
    }
}

/// In-memory source, mostly for tests and small fixtures.
pub struct VecSource {
    events: Vec<Event>,
}

impl VecSource {
    pub fn new(events: Vec<Event>) -> Self {
        VecSource { events }
    }
}

impl SourceStream for VecSource {
    fn count(&self) -> usize {
        self.events.len()
    }

    fn read(&mut self, position: usize) -> Result<Event, SpillError> {
        self.events
            .get(position)
            .cloned()
            .ok_or_else(|| SpillError::Stream(format!("read past the end at position {}", position)))
    }
}

/// Append-only writer for the event-file container.
pub struct EventFileWriter {
    writer: BufWriter<File>,
    count: usize,
}

impl EventFileWriter {
    pub fn create(path: &Path) -> Result<Self, SpillError> {
        let file = File::create(path).map_err(SpillError::Io)?;
        Ok(EventFileWriter {
            writer: BufWriter::new(file),
            count: 0,
        })
    }

    pub fn append(&mut self, event: &Event) -> Result<(), SpillError> {
        let config = bincode::config::standard();
        bincode::encode_into_std_write(event, &mut self.writer, config)?;
        self.count += 1;
        Ok(())
    }

    /// Flush and close, returning how many events were written.
    pub fn finish(mut self) -> Result<usize, SpillError> {
        self.writer.flush().map_err(SpillError::Io)?;
        Ok(self.count)
    }
}
