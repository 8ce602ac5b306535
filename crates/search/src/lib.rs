//! Catalog search and ranking for the Parfum storefront.
//!
//! This crate provides:
//! - Search text normalization
//! - Cyrillic ↔ Latin transliteration
//! - Fuzzy token matching (substring, subsequence, bounded Levenshtein)
//! - Note, season and day-part scoring
//! - Filtering, multi-key ordering and pagination over an in-memory catalog
//! - Repair and normalization of raw catalog JSON
//!
//! # Example
//!
//! ```
//! use parfum_search::{compute_catalog, CatalogEntry, FilterState, SortMode};
//!
//! let mut entry = CatalogEntry::new("a");
//! entry.name = "Vanilla Sky".into();
//! entry.notes.base = vec!["vanilla".into()];
//!
//! let entries = vec![entry];
//! let filter = FilterState::new().with_query("vanila").with_sort(SortMode::Match);
//!
//! let result = compute_catalog(&entries, &filter);
//! assert_eq!(result.total, 1);
//! ```

mod catalog;
mod entry;
mod error;
mod filter;
mod fuzzy;
mod json;
mod normalize;
mod pagination;
mod sanitize;
mod scoring;
mod translit;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{
    compute_catalog, CatalogQuery, CatalogResult, ScoredEntry, MUST_NOTE_GATE, PRESET_SENTINEL,
};
pub use entry::{CatalogEntry, Notes};
pub use error::{Result, SearchError, SearchErrorCode};
pub use filter::{split_list, FilterState, SortMode};
pub use fuzzy::{is_subsequence, levenshtein_distance, token_matches};
pub use json::search_json;
pub use normalize::{normalize, tokens};
pub use pagination::{
    clamp_page, compute_page, page_count, page_links, paginate, Page, PageLink, PageRequest,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use sanitize::{
    load_catalog_str, normalize_catalog, normalize_entry, CatalogLoad, Issue, IssueLevel,
    LoadSummary, ALLOWED_DAY_NIGHT, ALLOWED_SEASONS,
};
pub use scoring::{
    score_entry, NoteFilter, AVOID_NOTE_PENALTY, COVERAGE_WEIGHT, DAY_NIGHT_WEIGHT, MAX_SCORE,
    MIN_SCORE, MUST_NOTE_WEIGHT, SEASON_WEIGHT,
};
pub use translit::{cyrillic_to_latin, latin_to_cyrillic};
