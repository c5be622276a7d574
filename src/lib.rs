//! Listing-Tide: an incremental article listing watcher
//!
//! This crate checks a paginated article listing on a schedule, picks out the
//! articles it has not seen yet, and extracts their metadata. Progress between
//! runs is kept as a single watermark: the highest article id delivered so far.

pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Errors from setting up a crawler
///
/// Once built, a crawler does not fail: cycle-time problems are logged and
/// only shrink the result.
#[derive(Debug, Error)]
pub enum TideError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors from a single HTTP attempt
///
/// These never escape the fetcher: they are logged and retried, and an
/// exhausted retry budget is reported as a missing page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Transport error for {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
}

// Re-export commonly used types
pub use checkpoint::{CheckpointStore, FileCheckpoint, MemoryCheckpoint};
pub use config::Config;
pub use crawler::{Article, Coordinator, CycleReport, RunMode};
