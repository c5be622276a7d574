//! Article records extracted from listing pages

use serde::{Deserialize, Serialize};
use std::fmt;

/// One article accepted from a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Numeric id taken from the article URL; higher is newer
    pub id: u64,

    /// Link text of the article heading
    pub title: String,

    /// Article URL, absolute when it could be resolved
    pub url: String,

    /// Cover image URL, if the excerpt carries an image
    pub cover: Option<String>,

    /// Excerpt text; empty when the listing shows none
    pub desc: String,
}

/// Raw result of parsing one article container
///
/// Nothing is validated yet. Listing pages mix real articles with pinned
/// posts and ad blocks, so any field may be missing here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub url: Option<String>,
    pub id: Option<u64>,
    pub cover: Option<String>,
    pub desc: String,
}

/// Why a listing entry was not turned into an article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The container had no link element
    NoLink,
    /// The link text was empty
    EmptyTitle,
    /// The link target carried no `/<digits>.html` id
    NoId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLink => write!(f, "no link"),
            Self::EmptyTitle => write!(f, "empty title"),
            Self::NoId => write!(f, "no article id"),
        }
    }
}

impl ListingEntry {
    /// Validates the entry, checking link, then title, then id
    pub fn into_article(self) -> Result<Article, SkipReason> {
        let url = self.url.ok_or(SkipReason::NoLink)?;
        if self.title.is_empty() {
            return Err(SkipReason::EmptyTitle);
        }
        let id = self.id.ok_or(SkipReason::NoId)?;

        Ok(Article {
            id,
            title: self.title,
            url,
            cover: self.cover,
            desc: self.desc,
        })
    }
}
