//! WASM bindings for the storefront.

use wasm_bindgen::prelude::*;

/// Search a catalog and return one page of ids and scores as JSON.
///
/// # Arguments
/// * `catalog_json` - Catalog array as served by the API
/// * `request_json` - Filter state with optional `page` and `pageSize`
#[wasm_bindgen(js_name = searchCatalog)]
pub fn search_catalog(catalog_json: &str, request_json: &str) -> String {
    crate::search_json(catalog_json, request_json)
}

/// Normalize text the way the search engine does.
#[wasm_bindgen(js_name = normalizeText)]
pub fn normalize_text(input: &str) -> String {
    crate::normalize(input)
}

/// Check whether a query token matches a haystack token.
#[wasm_bindgen(js_name = tokenMatches)]
pub fn token_matches(needle: &str, haystack: &str) -> bool {
    crate::token_matches(needle, haystack)
}

/// Calculate Levenshtein edit distance between two strings.
#[wasm_bindgen(js_name = editDistance)]
pub fn edit_distance(a: &str, b: &str) -> usize {
    crate::levenshtein_distance(a, b)
}
