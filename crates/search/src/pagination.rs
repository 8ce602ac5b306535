//! Pagination over computed catalog results.

use crate::catalog::{compute_catalog, CatalogResult, ScoredEntry};
use crate::entry::CatalogEntry;
use crate::filter::FilterState;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Largest page size the catalog serves.
pub const MAX_PAGE_SIZE: usize = 60;

/// Page links are shown in full up to this many pages.
const FULL_LINK_LIMIT: usize = 7;

/// A requested page. Always has `page >= 1` and a page size in `1..=limit`.
///
/// Only built through [`PageRequest::new`], [`PageRequest::bounded`] or
/// [`PageRequest::from_query_pairs`], which enforce those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Request a page, capping the size at [`MAX_PAGE_SIZE`].
    ///
    /// Page 0 becomes page 1 and page size 0 becomes [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: usize, page_size: usize) -> Self {
        Self::bounded(page, page_size, MAX_PAGE_SIZE)
    }

    /// Request a page, capping the size at `max_page_size`.
    pub fn bounded(page: usize, page_size: usize, max_page_size: usize) -> Self {
        let page_size = if page_size == 0 { DEFAULT_PAGE_SIZE } else { page_size };
        Self {
            page: page.max(1),
            page_size: page_size.min(max_page_size.max(1)),
        }
    }

    /// Read `page` and `pageSize` URL query parameters.
    ///
    /// Missing, non-numeric and non-positive values fall back to the defaults.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut page = 1;
        let mut page_size = DEFAULT_PAGE_SIZE;
        for (key, value) in pairs {
            match key.as_ref() {
                "page" => page = parse_positive(value.as_ref()).unwrap_or(1),
                "pageSize" => {
                    page_size = parse_positive(value.as_ref()).unwrap_or(DEFAULT_PAGE_SIZE);
                }
                _ => {}
            }
        }
        Self::new(page, page_size)
    }

    /// Requested page number, starting at 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Number of pages needed for `total` items; never less than one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp `page` into the pages that exist for `total` items.
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size))
}

/// One window of a computed result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: Vec<ScoredEntry<'a>>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl Page<'_> {
    /// Links for a pagination bar around the current page.
    pub fn links(&self) -> Vec<PageLink> {
        page_links(self.page, self.total_pages)
    }
}

/// Cut one page out of a computed result.
///
/// The requested page is clamped to the pages that exist, so a page number
/// that became invalid after the filters changed still shows items.
pub fn paginate(result: CatalogResult<'_>, request: PageRequest) -> Page<'_> {
    let total = result.total;
    let page_size = request.page_size.max(1);
    let page = clamp_page(request.page, total, page_size);
    let clamped = PageRequest { page, page_size };

    let items = result
        .items
        .into_iter()
        .skip(clamped.offset())
        .take(page_size)
        .collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages: page_count(total, page_size),
    }
}

/// Compute the catalog and return only the requested page.
///
/// Filtering and ordering are identical to [`compute_catalog`].
pub fn compute_page<'a>(
    entries: &'a [CatalogEntry],
    filter: &FilterState,
    request: PageRequest,
) -> Page<'a> {
    paginate(compute_catalog(entries, filter), request)
}

/// An element of a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    /// A page number
    Page(usize),
    /// Skipped pages
    Gap,
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageLink::Page(n) => write!(f, "{n}"),
            PageLink::Gap => f.write_str("…"),
        }
    }
}

/// Build pagination bar links.
///
/// Up to seven pages are all listed. Beyond that the bar shows the first
/// two, the last two and the neighbours of the current page, with a
/// [`PageLink::Gap`] wherever numbers are skipped.
///
/// # Example
/// ```
/// use parfum_search::{page_links, PageLink};
///
/// let links: Vec<String> = page_links(6, 12).iter().map(ToString::to_string).collect();
/// assert_eq!(links, ["1", "2", "…", "5", "6", "7", "…", "11", "12"]);
/// ```
pub fn page_links(current: usize, total_pages: usize) -> Vec<PageLink> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    if total_pages <= FULL_LINK_LIMIT {
        return (1..=total_pages).map(PageLink::Page).collect();
    }

    let pages: BTreeSet<usize> = [
        1,
        2,
        current.saturating_sub(1).max(1),
        current,
        (current + 1).min(total_pages),
        total_pages - 1,
        total_pages,
    ]
    .into_iter()
    .collect();

    let mut links = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if previous.is_some_and(|prev| page - prev > 1) {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(page));
        previous = Some(page);
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(count: usize) -> Vec<CatalogEntry> {
        (0..count).map(|i| CatalogEntry::new(format!("p{i}"))).collect()
    }

    fn ids<'a>(page: &'a Page<'_>) -> Vec<&'a str> {
        page.items.iter().map(|s| s.entry.id.as_str()).collect()
    }

    #[test]
    fn test_page_request_bounds() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, page_size: 12 });
        assert_eq!(PageRequest::new(3, 500).page_size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::bounded(1, 30, 20).page_size, 20);
        assert_eq!(PageRequest::new(4, 10).offset(), 30);
    }

    #[test]
    fn test_page_request_accessors() {
        let request = PageRequest::bounded(0, 0, 10);
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 10);
    }

    #[test]
    fn test_paginate_never_uses_zero_page_size() {
        let entries = entries(3);
        let request = PageRequest { page: 1, page_size: 0 };
        let page = paginate(compute_catalog(&entries, &FilterState::new()), request);

        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(ids(&page), vec!["p0"]);
    }

    #[test]
    fn test_page_request_from_query() {
        let request = PageRequest::from_query_pairs([("page", "3"), ("pageSize", "24")]);
        assert_eq!(request, PageRequest { page: 3, page_size: 24 });

        let request = PageRequest::from_query_pairs([("page", "-2"), ("pageSize", "abc")]);
        assert_eq!(request, PageRequest::default());

        let request = PageRequest::from_query_pairs([("pageSize", "1000")]);
        assert_eq!(request.page_size, 60);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 12), 1);
        assert_eq!(page_count(12, 12), 1);
        assert_eq!(page_count(13, 12), 2);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 30, 10), 1);
        assert_eq!(clamp_page(9, 30, 10), 3);
        assert_eq!(clamp_page(2, 0, 10), 1);
    }

    #[test]
    fn test_compute_page_window() {
        let entries = entries(25);
        let page = compute_page(&entries, &FilterState::new(), PageRequest::new(2, 10));

        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(ids(&page).first(), Some(&"p10"));
        assert_eq!(page.items.len(), 10);
    }

    #[test]
    fn test_stale_page_is_clamped() {
        let entries = entries(5);
        let page = compute_page(&entries, &FilterState::new(), PageRequest::new(4, 2));

        assert_eq!(page.page, 3);
        assert_eq!(ids(&page), vec!["p4"]);
    }

    #[test]
    fn test_empty_result_page() {
        let page = compute_page(&[], &FilterState::new(), PageRequest::default());
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_page_links_short() {
        assert_eq!(
            page_links(2, 3),
            vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)]
        );
        assert_eq!(page_links(1, 0), vec![PageLink::Page(1)]);
    }

    #[test]
    fn test_page_links_edges() {
        use PageLink::{Gap, Page};
        assert_eq!(
            page_links(1, 10),
            vec![Page(1), Page(2), Gap, Page(9), Page(10)]
        );
        assert_eq!(
            page_links(10, 10),
            vec![Page(1), Page(2), Gap, Page(9), Page(10)]
        );
        assert_eq!(
            page_links(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Gap, Page(9), Page(10)]
        );
    }

    #[test]
    fn test_page_links_clamps_current() {
        assert_eq!(page_links(50, 10), page_links(10, 10));
    }
}
