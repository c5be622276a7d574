//! Checkpoint module for persisting the crawl watermark
//!
//! The only state kept between crawl cycles is the highest article id that
//! has been delivered. This module provides:
//! - The `CheckpointStore` trait the coordinator talks to
//! - A file-backed store holding the id as a decimal string
//! - An in-memory store for tests and dry runs

mod file;
mod memory;
mod traits;

pub use file::FileCheckpoint;
pub use memory::MemoryCheckpoint;
pub use traits::{CheckpointError, CheckpointResult, CheckpointStore};
