//! Output module for handing crawl results to their consumer
//!
//! This module handles:
//! - The `ArticleSink` interface a cycle's articles are delivered through
//! - JSON lines output for machine consumers
//! - A plain-text message layout for human readers

mod json;
mod text;
mod traits;

pub use json::JsonLinesSink;
pub use text::TextSink;
pub use traits::{ArticleSink, OutputError, OutputResult};
