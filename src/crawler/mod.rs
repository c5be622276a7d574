//! Crawler module for the incremental listing watcher
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry and exponential backoff
//! - Listing page parsing with fallback selectors
//! - First-run and incremental cycle orchestration
//! - Periodic scheduling of crawl cycles

mod article;
mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use article::{Article, ListingEntry, SkipReason};
pub use coordinator::{Coordinator, CycleReport, RunMode, StopReason};
pub use fetcher::{build_http_client, Fetcher, HttpTransport, RetryPolicy, Transport};
pub use parser::{parse_containers, parse_listing};
pub use scheduler::{run_periodic, ScheduleOptions};
