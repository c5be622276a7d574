use url::Url;

/// Resolves a link found in listing markup against the page it came from
///
/// HTTP(S) results are returned in absolute form. Anything that cannot be
/// resolved (no base, unparsable href, other schemes) is returned trimmed but
/// otherwise verbatim, since the id extraction only needs the path.
///
/// # Examples
///
/// ```
/// use listing_tide::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/wp/page/2/").unwrap();
/// assert_eq!(resolve_link("/wp/5.html", Some(&base)), "https://example.com/wp/5.html");
/// assert_eq!(resolve_link("/wp/5.html", None), "/wp/5.html");
/// ```
pub fn resolve_link(href: &str, base: Option<&Url>) -> String {
    let href = href.trim();

    let resolved = base
        .and_then(|base| base.join(href).ok())
        .filter(|url| url.scheme() == "http" || url.scheme() == "https");

    match resolved {
        Some(url) => url.to_string(),
        None => href.to_string(),
    }
}
