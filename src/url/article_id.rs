use once_cell::sync::Lazy;
use regex::Regex;

static ARTICLE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(\d+)\.html").expect("article id pattern is valid"));

/// Extracts the numeric article id from an article URL
///
/// Article pages are addressed as `.../<digits>.html`; the digits are the id.
/// Returns `None` when the pattern is absent or the number does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use listing_tide::url::extract_article_id;
///
/// assert_eq!(extract_article_id("https://example.com/wp/104.html"), Some(104));
/// assert_eq!(extract_article_id("https://example.com/wp/about/"), None);
/// ```
pub fn extract_article_id(url: &str) -> Option<u64> {
    ARTICLE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}
