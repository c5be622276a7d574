//! Configuration module for Listing-Tide
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use listing_tide::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("tide.toml")).unwrap();
//! println!("Watching {} ({} pages per cycle)", config.site.url, config.crawl.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CheckpointConfig, Config, CrawlConfig, FetchConfig, ScheduleConfig, SiteConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
