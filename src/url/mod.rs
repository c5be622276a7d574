//! URL handling module for Listing-Tide
//!
//! This module builds listing page URLs, resolves links found in listing
//! markup, and pulls numeric article ids out of article URLs.

mod article_id;
mod pagination;
mod resolve;

// Re-export main functions
pub use article_id::extract_article_id;
pub use pagination::{link_base, listing_base, page_url};
pub use resolve::resolve_link;
