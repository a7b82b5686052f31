use thiserror::Error;

use crate::fs::PLATFORM_MAX_PATH_LEN;
use crate::model::RenameEntry;

pub const INITIAL_CAPACITY: usize = 7;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppendError {
    #[error("current path is {len} bytes, longer than the {max} byte name limit")]
    NameTooLong { len: usize, max: usize },
    #[error("doubling the collection capacity would overflow")]
    CapacityOverflow,
    #[error("could not grow the collection's backing storage")]
    OutOfMemory,
}

/// Ordered collection of pending renames.
///
/// Capacity starts at [`INITIAL_CAPACITY`] and doubles whenever the
/// collection is full, with the overflow and allocation checks surfaced as
/// [`AppendError`] values instead of a panic or abort. A failed append
/// leaves the collection exactly as it was.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    entries: Vec<RenameEntry>,
    capacity: usize,
    max_name_len: usize,
}

impl RenamePlan {
    pub fn new() -> Self {
        Self::with_max_name_len(PLATFORM_MAX_PATH_LEN)
    }

    pub fn with_max_name_len(max_name_len: usize) -> Self {
        Self {
            entries: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            max_name_len,
        }
    }

    pub fn append(&mut self, entry: RenameEntry) -> Result<(), AppendError> {
        let len = entry.current_path.as_os_str().len();
        if len > self.max_name_len {
            return Err(AppendError::NameTooLong {
                len,
                max: self.max_name_len,
            });
        }
        if self.entries.len() == self.capacity {
            let doubled = self
                .capacity
                .checked_mul(2)
                .ok_or(AppendError::CapacityOverflow)?;
            self.entries
                .try_reserve_exact(doubled - self.entries.len())
                .map_err(|_| AppendError::OutOfMemory)?;
            self.capacity = doubled;
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capacity under the doubling schedule, not the allocator's rounding.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&RenameEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenameEntry> {
        self.entries.iter()
    }
}

impl Default for RenamePlan {
    fn default() -> Self {
        Self::new()
    }
}
