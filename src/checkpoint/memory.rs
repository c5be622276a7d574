//! In-memory checkpoint store

use crate::checkpoint::traits::{CheckpointResult, CheckpointStore};
use std::sync::{Arc, Mutex, MutexGuard};

/// Keeps the watermark in process memory
///
/// Clones share the same value, so a test can hand one clone to a
/// coordinator and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpoint {
    value: Arc<Mutex<Option<u64>>>,
}

impl MemoryCheckpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `id`
    pub fn with_value(id: u64) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(id))),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<u64>> {
        self.value.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CheckpointStore for MemoryCheckpoint {
    fn load(&self) -> Option<u64> {
        *self.slot()
    }

    fn save(&self, id: u64) -> CheckpointResult<()> {
        *self.slot() = Some(id);
        Ok(())
    }

    fn clear(&self) -> CheckpointResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
