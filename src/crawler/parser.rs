//! Listing page parser
//!
//! This module turns one listing page into article entries. Listing themes
//! vary over time, so the heading link is found by trying several selectors
//! in order, and any entry that fails to parse is skipped on its own rather
//! than failing the page.

use crate::crawler::article::{Article, ListingEntry};
use crate::url::{extract_article_id, resolve_link};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

static CONTAINER: Lazy<Selector> = Lazy::new(|| selector("article"));

/// Heading link candidates, most specific first
static LINK_CANDIDATES: Lazy<[Selector; 3]> =
    Lazy::new(|| [selector("header h1 a"), selector("h1 a"), selector("a")]);

/// The excerpt paragraph
static EXCERPT: Lazy<Selector> = Lazy::new(|| selector("div p"));

static IMAGE: Lazy<Selector> = Lazy::new(|| selector("img"));

/// Parses every article container on a listing page
///
/// Returns one entry per container, in document order, without validating
/// them. Relative links are resolved against `base` when it is given.
///
/// # Example
///
/// ```
/// use listing_tide::crawler::parse_containers;
///
/// let html = r#"<article><h1><a href="/wp/7.html">Seven</a></h1></article>"#;
/// let entries = parse_containers(html, None);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].id, Some(7));
/// ```
pub fn parse_containers(html: &str, base: Option<&Url>) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);

    document
        .select(&CONTAINER)
        .map(|container| parse_container(container, base))
        .collect()
}

/// Parses a listing page into validated articles
///
/// Containers without a link, with an empty title, or without an article id
/// are dropped.
pub fn parse_listing(html: &str, base: Option<&Url>) -> Vec<Article> {
    parse_containers(html, base)
        .into_iter()
        .filter_map(|entry| match entry.into_article() {
            Ok(article) => Some(article),
            Err(reason) => {
                tracing::debug!("Skipping listing entry: {}", reason);
                None
            }
        })
        .collect()
}

fn parse_container(container: ElementRef<'_>, base: Option<&Url>) -> ListingEntry {
    let link = LINK_CANDIDATES
        .iter()
        .find_map(|candidate| container.select(candidate).next());

    let Some(link) = link else {
        return ListingEntry::default();
    };

    let title = collapse_whitespace(&link.text().collect::<String>());
    let href = link.value().attr("href").unwrap_or("");
    let id = extract_article_id(href);
    let url = Some(resolve_link(href, base));

    let excerpt = container.select(&EXCERPT).next();
    let desc = excerpt.map(excerpt_text).unwrap_or_default();
    let cover = excerpt
        .and_then(|p| p.select(&IMAGE).next())
        .and_then(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .map(|src| resolve_link(src, base));

    ListingEntry {
        title,
        url,
        id,
        cover,
        desc,
    }
}

/// Text of an excerpt block, one line per text node
///
/// `<br>` and nested inline elements split the text into nodes, so line
/// breaks in the rendered excerpt survive.
fn excerpt_text(block: ElementRef<'_>) -> String {
    block
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
