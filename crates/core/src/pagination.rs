//! Link header pagination
//!
//! Basecamp paginates list endpoints with an RFC 5988 `Link` header, e.g.
//! `<https://3.basecampapi.com/999/projects.json?page=2>; rel="next"`.
//! The last page carries no `next` relation.

use regex::Regex;

/// Extract the `rel="next"` URL from a `Link` header value
pub fn next_page_url(link_header: &str) -> Option<String> {
    let re = Regex::new(r#"<([^>]+)>\s*;\s*rel="?next"?"#).unwrap();

    link_header
        .split(',')
        .find_map(|part| re.captures(part.trim()))
        .and_then(|caps| caps.get(1))
        .map(|url| url.as_str().to_string())
}

/// Extract the `page` query parameter from a paginated URL
pub fn page_number(url: &str) -> Option<usize> {
    let re = Regex::new(r"[?&]page=(\d+)").unwrap();

    re.captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|page| page.as_str().parse().ok())
}

/// Walks a paginated endpoint one page at a time
///
/// Holds the URL of the next page to request. After each response, feed its
/// `Link` header to [`Paginator::advance`]. The walk ends when a page has no
/// `next` relation or points back at itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current: Option<String>,
    pending: Option<String>,
}

impl Paginator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            current: None,
            pending: Some(url.into()),
        }
    }

    /// Take the URL of the next page to request, if any
    pub fn next_url(&mut self) -> Option<String> {
        let url = self.pending.take()?;
        self.current = Some(url.clone());
        Some(url)
    }

    /// Record the `Link` header of the page just fetched
    pub fn advance(&mut self, link_header: Option<&str>) {
        self.pending = link_header
            .and_then(next_page_url)
            .filter(|next| self.current.as_deref() != Some(next.as_str()));
    }

    /// Page number of the upcoming request, for progress logging
    pub fn pending_page(&self) -> Option<usize> {
        self.pending.as_deref().and_then(page_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str) -> String {
        format!(r#"<{url}>; rel="next""#)
    }

    #[test]
    fn test_next_page_url_basic() {
        let header = r#"<https://3.basecampapi.com/999/projects.json?page=2>; rel="next""#;
        assert_eq!(
            next_page_url(header),
            Some("https://3.basecampapi.com/999/projects.json?page=2".to_string())
        );
    }

    #[test]
    fn test_next_page_url_among_other_relations() {
        let header = r#"<https://example.com/a.json?page=1>; rel="prev", <https://example.com/a.json?page=3>; rel="next""#;
        assert_eq!(
            next_page_url(header),
            Some("https://example.com/a.json?page=3".to_string())
        );
    }

    #[test]
    fn test_next_page_url_missing() {
        let header = r#"<https://example.com/a.json?page=1>; rel="prev""#;
        assert_eq!(next_page_url(header), None);
    }

    #[test]
    fn test_next_page_url_empty() {
        assert_eq!(next_page_url(""), None);
    }

    #[test]
    fn test_page_number() {
        assert_eq!(page_number("https://example.com/a.json?page=4"), Some(4));
        assert_eq!(page_number("https://example.com/a.json?status=active&page=12"), Some(12));
        assert_eq!(page_number("https://example.com/a.json"), None);
    }

    #[test]
    fn test_paginator_single_page() {
        let mut pages = Paginator::new("https://example.com/a.json");

        assert_eq!(pages.next_url().as_deref(), Some("https://example.com/a.json"));
        pages.advance(None);
        assert_eq!(pages.next_url(), None);
    }

    #[test]
    fn test_paginator_follows_next_links() {
        let mut pages = Paginator::new("https://example.com/a.json");
        let headers = [
            Some(link("https://example.com/a.json?page=2")),
            Some(format!(
                r#"<https://example.com/a.json?page=1>; rel="prev", {}"#,
                link("https://example.com/a.json?page=3")
            )),
            Some(r#"<https://example.com/a.json?page=2>; rel="prev""#.to_string()),
        ];

        let mut fetched = Vec::new();
        let mut headers = headers.iter();
        while let Some(url) = pages.next_url() {
            fetched.push(url);
            pages.advance(headers.next().and_then(|h| h.as_deref()));
        }

        assert_eq!(
            fetched,
            vec![
                "https://example.com/a.json",
                "https://example.com/a.json?page=2",
                "https://example.com/a.json?page=3",
            ]
        );
    }

    #[test]
    fn test_paginator_stops_on_self_link() {
        let mut pages = Paginator::new("https://example.com/a.json?page=2");

        pages.next_url();
        pages.advance(Some(&link("https://example.com/a.json?page=2")));

        assert_eq!(pages.next_url(), None);
    }

    #[test]
    fn test_paginator_pending_page() {
        let mut pages = Paginator::new("https://example.com/a.json");
        assert_eq!(pages.pending_page(), None);

        pages.next_url();
        pages.advance(Some(&link("https://example.com/a.json?page=2")));

        assert_eq!(pages.pending_page(), Some(2));
    }
}
