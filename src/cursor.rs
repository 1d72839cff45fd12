use crate::error::SpillError;
use crate::event::Event;
use crate::source::{SourceStream, SourceTag};

/// Sequential reader over one source stream. Advances by exactly one record
/// per `next` call and never re-reads. The planner checks `remaining` before
/// committing to a spill, so hitting `Exhausted` means a planning bug.
pub struct StreamCursor<S: SourceStream> {
    source: S,
    tag: SourceTag,
    position: usize,
}

impl<S: SourceStream> StreamCursor<S> {
    pub fn new(source: S, tag: SourceTag) -> Self {
        StreamCursor {
            source,
            tag,
            position: 0,
        }
    }

    pub fn tag(&self) -> SourceTag {
        self.tag
    }

    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.source.count() - self.position
    }

    pub fn next(&mut self) -> Result<Event, SpillError> {
        if self.position >= self.source.count() {
            return Err(SpillError::Exhausted {
                source: self.tag,
                position: self.position,
            });
        }
        let event = self.source.read(self.position)?;
        self.position += 1;
        Ok(event)
    }
}
