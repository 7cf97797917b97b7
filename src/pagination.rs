//! Pagination cursors carried by the `Link` response header.
//!
//! The provider answers each search with a header such as
//!
//! ```text
//! <https://api.unsplash.com/search/photos?page=1&query=cats>; rel="first",
//! <https://api.unsplash.com/search/photos?page=3&query=cats>; rel="next"
//! ```
//!
//! Each segment is reduced to `relation -> page number`. Segments that do not
//! parse are skipped, so a damaged header degrades to fewer cursors instead of
//! failing the whole fetch.

use std::collections::BTreeMap;
use log::debug;
use reqwest::Url;

pub const REL_NEXT: &str = "next";
pub const REL_PREV: &str = "prev";
pub const REL_FIRST: &str = "first";
pub const REL_LAST: &str = "last";

/// Mapping from link relation to page number for one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationCursors {
    pages: BTreeMap<String, u32>,
}

impl PaginationCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an optional `Link` header value. `None` yields an empty set.
    pub fn from_link_header(header: Option<&str>) -> Self {
        header.map(Self::parse).unwrap_or_default()
    }

    /// Parses a `Link` header value.
    pub fn parse(header: &str) -> Self {
        let mut cursors = Self::new();
        for segment in header.split(',') {
            match parse_segment(segment) {
                Some((rel, page)) => {
                    cursors.pages.insert(rel, page);
                }
                None => {
                    if !segment.trim().is_empty() {
                        debug!("Skipping malformed Link segment: {}", segment.trim());
                    }
                }
            }
        }
        cursors
    }

    /// Builds a cursor set from explicit pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            pages: pairs.into_iter().map(|(rel, page)| (rel.into(), page)).collect(),
        }
    }

    /// Page number for a relation, if present.
    pub fn get(&self, rel: &str) -> Option<u32> {
        self.pages.get(rel).copied()
    }

    pub fn next(&self) -> Option<u32> {
        self.get(REL_NEXT)
    }

    pub fn prev(&self) -> Option<u32> {
        self.get(REL_PREV)
    }

    pub fn first(&self) -> Option<u32> {
        self.get(REL_FIRST)
    }

    pub fn last(&self) -> Option<u32> {
        self.get(REL_LAST)
    }

    /// True when the result set has no further page.
    pub fn is_exhausted(&self) -> bool {
        self.next().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.pages.iter().map(|(rel, page)| (rel.as_str(), *page))
    }
}

/// Parses `<url>; rel="name"` into `(name, page)`.
fn parse_segment(segment: &str) -> Option<(String, u32)> {
    let mut parts = segment.split(';').map(str::trim);

    let target = parts.next()?;
    let url = target.strip_prefix('<')?.strip_suffix('>')?;

    let rel = parts.find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("rel") {
            let value = value.trim().trim_matches('"');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })?;

    let page = page_from_url(url)?;
    Some((rel, page))
}

/// Extracts the `page` query parameter of a URL.
fn page_from_url(url: &str) -> Option<u32> {
    let url = Url::parse(url).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .map(|(_, value)| value.into_owned())?;
    page.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "<https://api.unsplash.com/search/photos?page=1&query=cats>; rel=\"first\", \
        <https://api.unsplash.com/search/photos?page=1&query=cats>; rel=\"prev\", \
        <https://api.unsplash.com/search/photos?page=334&query=cats>; rel=\"last\", \
        <https://api.unsplash.com/search/photos?page=3&query=cats>; rel=\"next\"";

    #[test]
    fn test_parse_all_relations() {
        let cursors = PaginationCursors::parse(HEADER);
        assert_eq!(cursors.first(), Some(1));
        assert_eq!(cursors.prev(), Some(1));
        assert_eq!(cursors.last(), Some(334));
        assert_eq!(cursors.next(), Some(3));
        assert_eq!(cursors.len(), 4);
        assert!(!cursors.is_exhausted());
    }

    #[test]
    fn test_absent_header_is_empty() {
        let cursors = PaginationCursors::from_link_header(None);
        assert!(cursors.is_empty());
        assert!(cursors.is_exhausted());
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let header = "garbage, <https://x.test/p?query=a>; rel=\"last\", \
            <not a url>; rel=\"prev\", <https://x.test/p?page=two>; rel=\"first\", \
            https://x.test/p?page=5; rel=\"broken\", \
            <https://x.test/p?page=2>; rel=\"next\"";
        let cursors = PaginationCursors::parse(header);

        assert_eq!(cursors.len(), 1);
        assert_eq!(cursors.next(), Some(2));
    }

    #[test]
    fn test_missing_rel_is_skipped() {
        let cursors = PaginationCursors::parse("<https://x.test/p?page=2>; title=\"next\"");
        assert!(cursors.is_empty());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let header = "<https://x.test/p?page=1>; rel=\"first\", <https://x.test/p?page=4>; rel=\"prev\"";
        let cursors = PaginationCursors::parse(header);
        assert!(cursors.is_exhausted());
        assert_eq!(cursors.prev(), Some(4));
    }
}
