use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;

use crate::error::SpillError;
use crate::source::SourceTag;

/// Map a source-local identifier into the merged identifier space.
///
/// Beam identifiers pass through unchanged; rock identifiers map to
/// `-(id + 1)`, which sends the non-negative integers injectively onto the
/// strictly negative ones. The two spaces cannot collide as long as both
/// sources produce non-negative identifiers, which is a precondition on the
/// input streams, not something enforced here.
pub fn final_identifier(id: i64, tag: SourceTag) -> i64 {
    match tag {
        SourceTag::Beam => id,
        SourceTag::Rock => -(id + 1),
    }
}

/// Append-only record of which spill every merged event landed in, keyed by
/// final identifier. One table exists per run; a duplicate key means the
/// remapped identifier spaces collided and the run must abort.
#[derive(Debug, Default)]
pub struct MappingTable {
    entries: FxHashMap<i64, u32>,
}

impl MappingTable {
    pub fn new() -> Self {
        MappingTable::default()
    }

    pub fn register(&mut self, final_id: i64, spill_number: u32) -> Result<(), SpillError> {
        match self.entries.entry(final_id) {
            Entry::Occupied(_) => Err(SpillError::DuplicateIdentifier(final_id)),
            Entry::Vacant(slot) => {
                slot.insert(spill_number);
                Ok(())
            }
        }
    }

    pub fn spill_of(&self, final_id: i64) -> Option<u32> {
        self.entries.get(&final_id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by final identifier, for deterministic persistence.
    pub fn sorted_entries(&self) -> Vec<(i64, u32)> {
        let mut entries: Vec<(i64, u32)> = self.entries.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by_key(|&(id, _)| id);
        entries
    }
}
