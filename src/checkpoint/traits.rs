//! Checkpoint traits and error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a checkpoint
///
/// Reads never fail: an unreadable or corrupt checkpoint is reported as absent.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to write checkpoint {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove checkpoint {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for checkpoint operations
pub type CheckpointResult<T> = Result<T, CheckpointError>;

/// Storage for the highest article id seen so far
///
/// The coordinator is the single writer. Callers only ever save a value that
/// is greater than the one they loaded.
pub trait CheckpointStore {
    /// Returns the stored id, or `None` if there is no usable checkpoint
    fn load(&self) -> Option<u64>;

    /// Overwrites the stored id
    fn save(&self, id: u64) -> CheckpointResult<()>;

    /// Removes the checkpoint so the next cycle is a first run
    fn clear(&self) -> CheckpointResult<()>;
}
