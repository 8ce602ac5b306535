//! JSON-in, JSON-out search for callers across a language boundary.

use crate::filter::FilterState;
use crate::pagination::{compute_page, PageRequest, DEFAULT_PAGE_SIZE};
use crate::sanitize::normalize_catalog;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Filter state plus the requested page.
///
/// Page numbers are kept raw so that a bad `page` or `pageSize` falls back
/// to its default instead of rejecting the whole request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchRequest {
    #[serde(flatten)]
    filter: FilterState,
    page: Option<Value>,
    page_size: Option<Value>,
}

impl SearchRequest {
    fn page_request(&self) -> PageRequest {
        PageRequest::new(
            positive(self.page.as_ref()).unwrap_or(1),
            positive(self.page_size.as_ref()).unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// A positive whole number, given as a JSON number or a numeric string.
fn positive(value: Option<&Value>) -> Option<usize> {
    let n = match value? {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    usize::try_from(n).ok().filter(|n| *n > 0)
}

#[derive(Debug, Serialize)]
struct Hit<'a> {
    id: &'a str,
    score: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse<'a> {
    total: usize,
    page: usize,
    page_size: usize,
    total_pages: usize,
    items: Vec<Hit<'a>>,
}

impl SearchResponse<'_> {
    fn empty(page_size: usize) -> Self {
        Self {
            total: 0,
            page: 1,
            page_size,
            total_pages: 1,
            items: Vec::new(),
        }
    }
}

/// Search a raw catalog document.
///
/// # Arguments
/// * `catalog_json` - catalog array (or paged `{items: [...]}` object)
/// * `request_json` - filter state with optional `page` / `pageSize`
///
/// # Returns
/// JSON object with `total`, `page`, `pageSize`, `totalPages` and `items`
/// holding `id` and `score` in display order. Unparsable input yields an
/// empty page instead of an error.
///
/// # Example
/// ```
/// let catalog = r#"[{"id":"a","brand":"B","name":"Ladan","notes":{"base":["incense"]}}]"#;
/// let out = parfum_search::search_json(catalog, r#"{"q":"ладан"}"#);
/// assert!(out.contains(r#""total":1"#));
/// ```
pub fn search_json(catalog_json: &str, request_json: &str) -> String {
    let request: SearchRequest = if request_json.trim().is_empty() {
        SearchRequest::default()
    } else {
        match serde_json::from_str(request_json) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unreadable search request");
                return to_json(&SearchResponse::empty(DEFAULT_PAGE_SIZE));
            }
        }
    };

    let page_request = request.page_request();

    let raw: serde_json::Value = match serde_json::from_str(catalog_json) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "Unreadable catalog");
            return to_json(&SearchResponse::empty(page_request.page_size()));
        }
    };

    let load = normalize_catalog(&raw);
    let page = compute_page(&load.entries, &request.filter, page_request);

    to_json(&SearchResponse {
        total: page.total,
        page: page.page,
        page_size: page.page_size,
        total_pages: page.total_pages,
        items: page
            .items
            .iter()
            .map(|s| Hit {
                id: &s.entry.id,
                score: s.score,
            })
            .collect(),
    })
}

fn to_json(response: &SearchResponse<'_>) -> String {
    serde_json::to_string(response).unwrap_or_else(|_| r#"{"total":0,"items":[]}"#.to_string())
}
