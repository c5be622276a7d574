//! Output sink traits and error types

use crate::crawler::Article;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize article: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Consumer of the articles found by a crawl cycle
pub trait ArticleSink {
    /// Delivers one cycle's articles, in discovery order
    ///
    /// Called once per cycle, also when the cycle found nothing.
    fn deliver(&mut self, articles: &[Article]) -> OutputResult<()>;
}
