use url::Url;

/// Returns the listing base URL with trailing slashes removed
pub fn listing_base(site_url: &str) -> &str {
    site_url.trim_end_matches('/')
}

/// Builds the URL of a listing page
///
/// Page 1 is the listing base itself; later pages live under `/page/<n>/`.
///
/// # Examples
///
/// ```
/// use listing_tide::url::page_url;
///
/// assert_eq!(page_url("https://example.com/wp/", 1), "https://example.com/wp");
/// assert_eq!(page_url("https://example.com/wp/", 3), "https://example.com/wp/page/3/");
/// ```
pub fn page_url(site_url: &str, page: u32) -> String {
    let base = listing_base(site_url);
    if page <= 1 {
        base.to_string()
    } else {
        format!("{}/page/{}/", base, page)
    }
}

/// Returns the URL that links on a listing page are relative to
///
/// Page 1 is fetched without a trailing slash, but relative links on it
/// still live under the listing directory, so the base keeps the slash.
///
/// # Examples
///
/// ```
/// use listing_tide::url::link_base;
///
/// let base = link_base("https://example.com/wp", 1).unwrap();
/// assert_eq!(base.join("./5.html").unwrap().as_str(), "https://example.com/wp/5.html");
/// ```
pub fn link_base(site_url: &str, page: u32) -> Option<Url> {
    let url = if page <= 1 {
        format!("{}/", listing_base(site_url))
    } else {
        page_url(site_url, page)
    };
    Url::parse(&url).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_is_base() {
        assert_eq!(page_url("https://example.com/wp", 1), "https://example.com/wp");
        assert_eq!(page_url("https://example.com/wp//", 1), "https://example.com/wp");
    }

    #[test]
    fn test_later_pages() {
        assert_eq!(
            page_url("https://example.com/wp", 2),
            "https://example.com/wp/page/2/"
        );
        assert_eq!(
            page_url("https://example.com/wp/", 10),
            "https://example.com/wp/page/10/"
        );
    }

    #[test]
    fn test_listing_base() {
        assert_eq!(listing_base("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
        assert_eq!(listing_base("http://127.0.0.1:8080"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_link_base_keeps_listing_directory() {
        let base = link_base("https://www.example.org/wp/", 1).unwrap();
        assert_eq!(base.as_str(), "https://www.example.org/wp/");
        assert_eq!(
            base.join("./12345.html").unwrap().as_str(),
            "https://www.example.org/wp/12345.html"
        );
        assert_eq!(
            base.join("img/c.jpg").unwrap().as_str(),
            "https://www.example.org/wp/img/c.jpg"
        );
    }

    #[test]
    fn test_link_base_for_later_pages() {
        let base = link_base("https://example.com/wp", 2).unwrap();
        assert_eq!(base.as_str(), "https://example.com/wp/page/2/");
        assert!(link_base("not a url", 1).is_none());
    }
}
