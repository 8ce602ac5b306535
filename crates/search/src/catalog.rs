//! Catalog compute engine: text filter, score gate and ordering.
//!
//! Everything here is a pure function over borrowed data. The input slice is
//! never modified and no state survives between calls.

use crate::entry::CatalogEntry;
use crate::filter::{FilterState, SortMode};
use crate::fuzzy::token_matches;
use crate::normalize::{normalize, tokens};
use crate::scoring::{NoteFilter, MIN_SCORE};
use crate::translit::{cyrillic_to_latin, latin_to_cyrillic};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Minimum score an entry needs once any must-note is requested.
pub const MUST_NOTE_GATE: f64 = 1.0;

/// Preset position given to entries missing from the preset list.
pub const PRESET_SENTINEL: usize = 999_999;

/// An entry paired with its score for the current filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredEntry<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
}

/// All surviving entries in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogResult<'a> {
    pub total: usize,
    pub items: Vec<ScoredEntry<'a>>,
}

/// A parsed search query: the normalized token set plus its Latin
/// transliteration as a fallback token set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    tokens: Vec<String>,
    alt_tokens: Vec<String>,
}

impl CatalogQuery {
    /// Parse raw search box text.
    pub fn new(raw: &str) -> Self {
        let normalized = normalize(raw);
        let alt = cyrillic_to_latin(&normalized);
        Self {
            tokens: tokens(&normalized).map(str::to_owned).collect(),
            alt_tokens: tokens(&alt).map(str::to_owned).collect(),
        }
    }

    /// True when the query places no constraint.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Normalized query tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Check whether every token of either token set is found in the entry.
    ///
    /// # Example
    /// ```
    /// use parfum_search::{CatalogEntry, CatalogQuery};
    ///
    /// let mut entry = CatalogEntry::new("p1");
    /// entry.name = "Ladan".into();
    ///
    /// assert!(CatalogQuery::new("ладан").matches(&entry));
    /// assert!(!CatalogQuery::new("ваниль").matches(&entry));
    /// ```
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if self.is_empty() {
            return true;
        }

        let haystack = Haystack::new(entry);
        if haystack.accepts_all(&self.tokens) {
            return true;
        }

        // identical token sets would only repeat the same check
        !self.alt_tokens.is_empty()
            && self.alt_tokens != self.tokens
            && haystack.accepts_all(&self.alt_tokens)
    }
}

/// Searchable text of one entry in three scripts: as normalized, in Latin, in Cyrillic.
struct Haystack {
    forms: [String; 3],
}

impl Haystack {
    fn new(entry: &CatalogEntry) -> Self {
        let normalized = normalize(&entry.search_text());
        let latin = cyrillic_to_latin(&normalized);
        let cyrillic = latin_to_cyrillic(&normalized);
        Self {
            forms: [normalized, latin, cyrillic],
        }
    }

    fn accepts_all(&self, needles: &[String]) -> bool {
        needles.iter().all(|needle| self.accepts(needle))
    }

    fn accepts(&self, needle: &str) -> bool {
        self.forms.iter().any(|form| form.contains(needle))
            || self
                .forms
                .iter()
                .any(|form| tokens(form).any(|hay| token_matches(needle, hay)))
    }
}

/// Filter, score and order a catalog.
///
/// 1. restrict to `preset_ids` when given (unknown ids are dropped, a repeated
///    id keeps only its first occurrence)
/// 2. score every entry
/// 3. keep entries whose text matches the query
/// 4. with any must-note requested, keep only scores of at least [`MUST_NOTE_GATE`]
/// 5. stable sort by the active [`SortMode`]
///
/// # Example
/// ```
/// use parfum_search::{compute_catalog, CatalogEntry, FilterState, SortMode};
///
/// let mut cheap = CatalogEntry::new("cheap");
/// cheap.price = 1500.0;
/// let mut dear = CatalogEntry::new("dear");
/// dear.price = 9000.0;
///
/// let entries = vec![dear, cheap];
/// let filter = FilterState::new().with_sort(SortMode::PriceAsc);
/// let result = compute_catalog(&entries, &filter);
///
/// assert_eq!(result.total, 2);
/// assert_eq!(result.items[0].entry.id, "cheap");
/// ```
pub fn compute_catalog<'a>(entries: &'a [CatalogEntry], filter: &FilterState) -> CatalogResult<'a> {
    let query = CatalogQuery::new(&filter.query);

    let candidates = working_set(entries, &filter.preset_ids);
    let min_score = if filter.must_notes.is_empty() {
        MIN_SCORE
    } else {
        MUST_NOTE_GATE
    };

    let notes = NoteFilter::from_filter(filter);
    let mut items = evaluate(&candidates, &notes, &query, min_score);
    sort_items(&mut items, filter);

    debug!(
        entries = entries.len(),
        candidates = candidates.len(),
        survivors = items.len(),
        sort = %filter.sort,
        "Catalog computed"
    );

    CatalogResult {
        total: items.len(),
        items,
    }
}

/// Entries the filters apply to: the preset subset in preset order, or everything.
fn working_set<'a>(entries: &'a [CatalogEntry], preset_ids: &[String]) -> Vec<&'a CatalogEntry> {
    if preset_ids.is_empty() {
        return entries.iter().collect();
    }

    let mut by_id: HashMap<&str, &'a CatalogEntry> = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_id.entry(entry.id.as_str()).or_insert(entry);
    }

    let mut seen = HashSet::with_capacity(preset_ids.len());
    preset_ids
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}

fn evaluate_one<'a>(
    entry: &'a CatalogEntry,
    notes: &NoteFilter<'_>,
    query: &CatalogQuery,
    min_score: f64,
) -> Option<ScoredEntry<'a>> {
    let score = notes.score(entry);
    // gate first, text matching last
    if score < min_score || !query.matches(entry) {
        return None;
    }
    Some(ScoredEntry { entry, score })
}

#[cfg(feature = "parallel")]
fn evaluate<'a>(
    working_set: &[&'a CatalogEntry],
    notes: &NoteFilter<'_>,
    query: &CatalogQuery,
    min_score: f64,
) -> Vec<ScoredEntry<'a>> {
    use rayon::prelude::*;
    working_set
        .par_iter()
        .filter_map(|entry| evaluate_one(*entry, notes, query, min_score))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate<'a>(
    working_set: &[&'a CatalogEntry],
    notes: &NoteFilter<'_>,
    query: &CatalogQuery,
    min_score: f64,
) -> Vec<ScoredEntry<'a>> {
    working_set
        .iter()
        .filter_map(|entry| evaluate_one(*entry, notes, query, min_score))
        .collect()
}

type Comparator = fn(&ScoredEntry<'_>, &ScoredEntry<'_>) -> Ordering;

/// Comparator for every mode that orders by entry attributes alone.
fn comparator(mode: SortMode) -> Comparator {
    match mode {
        SortMode::Match | SortMode::Preset => by_score,
        SortMode::Hits => by_hits,
        SortMode::Popular => by_popularity,
        SortMode::PopularMonth => by_popularity_month,
        SortMode::PriceAsc => by_price_asc,
        SortMode::PriceDesc => by_price_desc,
        SortMode::Longevity => by_longevity,
        SortMode::Sillage => by_sillage,
    }
}

fn by_score(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    desc(a.score, b.score)
}

fn by_hits(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    desc(a.entry.order_count, b.entry.order_count).then_with(|| by_score(a, b))
}

fn by_popularity(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    desc(a.entry.popularity, b.entry.popularity).then_with(|| by_score(a, b))
}

fn by_popularity_month(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    desc(a.entry.popularity_month, b.entry.popularity_month)
        .then_with(|| desc(a.entry.popularity, b.entry.popularity))
}

fn by_price_asc(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    asc(a.entry.price, b.entry.price)
}

fn by_price_desc(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    desc(a.entry.price, b.entry.price)
}

fn by_longevity(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    b.entry.longevity.cmp(&a.entry.longevity)
}

fn by_sillage(a: &ScoredEntry<'_>, b: &ScoredEntry<'_>) -> Ordering {
    b.entry.sillage.cmp(&a.entry.sillage)
}

fn sort_items(items: &mut [ScoredEntry<'_>], filter: &FilterState) {
    // preset order only applies when there is a preset to follow
    if filter.sort == SortMode::Preset && !filter.preset_ids.is_empty() {
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(filter.preset_ids.len());
        for (index, id) in filter.preset_ids.iter().enumerate() {
            positions.entry(id.as_str()).or_insert(index);
        }
        items.sort_by_key(|item| {
            positions
                .get(item.entry.id.as_str())
                .copied()
                .unwrap_or(PRESET_SENTINEL)
        });
        return;
    }

    items.sort_by(comparator(filter.sort));
}

#[inline]
fn asc(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[inline]
fn desc(a: f64, b: f64) -> Ordering {
    asc(b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> CatalogEntry {
        let mut entry = CatalogEntry::new(id);
        entry.brand = "Brand".into();
        entry.name = id.to_uppercase();
        entry
    }

    fn ids<'a>(result: &'a CatalogResult<'_>) -> Vec<&'a str> {
        result.items.iter().map(|s| s.entry.id.as_str()).collect()
    }

    #[test]
    fn test_empty_catalog() {
        let result = compute_catalog(&[], &FilterState::new().with_query("oud"));
        assert_eq!(result.total, 0);
        assert!(result.items.is_empty());
    }

    #[test]
    fn test_empty_query_keeps_everything_in_order() {
        let entries = vec![entry("a"), entry("b"), entry("c")];
        let result = compute_catalog(&entries, &FilterState::new());
        assert_eq!(ids(&result), vec!["a", "b", "c"]);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn test_query_filters_entries() {
        let mut oud = entry("a");
        oud.notes.base = vec!["oud".into()];
        let mut rose = entry("b");
        rose.notes.heart = vec!["rose".into()];

        let entries = vec![oud, rose];
        let result = compute_catalog(&entries, &FilterState::new().with_query("Rose!"));
        assert_eq!(ids(&result), vec!["b"]);
    }

    #[test]
    fn test_all_query_tokens_must_match() {
        let mut a = entry("a");
        a.notes.base = vec!["oud".into(), "amber".into()];
        let mut b = entry("b");
        b.notes.base = vec!["oud".into()];

        let entries = vec![a, b];
        let result = compute_catalog(&entries, &FilterState::new().with_query("oud amber"));
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_latin_query_matches_cyrillic_name() {
        let mut a = entry("a");
        a.search_name_ru = "Шипр".into();
        let entries = vec![a, entry("b")];

        let result = compute_catalog(&entries, &FilterState::new().with_query("shipr"));
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_must_note_gate() {
        let mut with_oud = entry("a");
        with_oud.notes.base = vec!["oud".into()];
        let mut without = entry("b");
        without.notes.base = vec!["musk".into()];

        let entries = vec![without, with_oud];
        let result = compute_catalog(&entries, &FilterState::new().with_must_notes(["oud"]));
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_no_gate_without_must_notes() {
        let mut a = entry("a");
        a.notes.base = vec!["musk".into()];
        let entries = vec![a];

        let result = compute_catalog(&entries, &FilterState::new().with_avoid_notes(["musk"]));
        assert_eq!(result.total, 1);
        assert!((result.items[0].score + 2.8).abs() < 1e-9);
    }

    #[test]
    fn test_match_sort_is_stable() {
        let mut a = entry("a");
        a.seasons = vec!["Winter".into()];
        let b = entry("b");
        let mut c = entry("c");
        c.seasons = vec!["Winter".into()];
        let d = entry("d");

        let entries = vec![a, b, c, d];
        let filter = FilterState::new()
            .with_seasons(["Winter"])
            .with_sort(SortMode::Match);
        let result = compute_catalog(&entries, &filter);
        assert_eq!(ids(&result), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_preset_restricts_and_orders() {
        let entries = vec![entry("p1"), entry("p2"), entry("p3"), entry("p4")];
        let filter = FilterState::new()
            .with_preset_ids(["p3", "missing", "p1", "p2"])
            .with_sort(SortMode::Preset);

        let result = compute_catalog(&entries, &filter);
        assert_eq!(ids(&result), vec!["p3", "p1", "p2"]);
    }

    #[test]
    fn test_preset_duplicates_are_listed_once() {
        let entries = vec![entry("p1"), entry("p2")];
        let filter = FilterState::new()
            .with_preset_ids(["p2", "p1", "p2"])
            .with_sort(SortMode::Preset);

        let result = compute_catalog(&entries, &filter);
        assert_eq!(ids(&result), vec!["p2", "p1"]);
    }

    #[test]
    fn test_preset_sort_without_presets_orders_by_score() {
        let a = entry("a");
        let mut b = entry("b");
        b.seasons = vec!["Summer".into()];

        let entries = vec![a, b];
        let filter = FilterState::new()
            .with_seasons(["Summer"])
            .with_sort(SortMode::Preset);
        let result = compute_catalog(&entries, &filter);
        assert_eq!(ids(&result), vec!["b", "a"]);
    }

    #[test]
    fn test_hits_sort_breaks_ties_by_score() {
        let mut a = entry("a");
        a.order_count = 5.0;
        let mut b = entry("b");
        b.order_count = 9.0;
        let mut c = entry("c");
        c.order_count = 5.0;
        c.seasons = vec!["Winter".into()];

        let entries = vec![a, b, c];
        let filter = FilterState::new()
            .with_seasons(["Winter"])
            .with_sort(SortMode::Hits);
        let result = compute_catalog(&entries, &filter);
        assert_eq!(ids(&result), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_popular_month_breaks_ties_by_popularity() {
        let mut a = entry("a");
        a.popularity_month = 3.0;
        a.popularity = 1.0;
        let mut b = entry("b");
        b.popularity_month = 3.0;
        b.popularity = 8.0;
        let mut c = entry("c");
        c.popularity_month = 10.0;

        let entries = vec![a, b, c];
        let result = compute_catalog(&entries, &FilterState::new().with_sort(SortMode::PopularMonth));
        assert_eq!(ids(&result), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_attribute_sorts() {
        let mut a = entry("a");
        a.price = 300.0;
        a.longevity = 2;
        a.sillage = 5;
        a.popularity = 1.0;
        let mut b = entry("b");
        b.price = 100.0;
        b.longevity = 5;
        b.sillage = 1;
        b.popularity = 7.0;
        let mut c = entry("c");
        c.price = 200.0;
        c.longevity = 3;
        c.sillage = 3;
        c.popularity = 4.0;
        let entries = vec![a, b, c];

        let sorted = |mode| {
            let result = compute_catalog(&entries, &FilterState::new().with_sort(mode));
            ids(&result).into_iter().map(str::to_owned).collect::<Vec<_>>()
        };

        assert_eq!(sorted(SortMode::PriceAsc), vec!["b", "c", "a"]);
        assert_eq!(sorted(SortMode::PriceDesc), vec!["a", "c", "b"]);
        assert_eq!(sorted(SortMode::Longevity), vec!["b", "c", "a"]);
        assert_eq!(sorted(SortMode::Sillage), vec!["a", "c", "b"]);
        assert_eq!(sorted(SortMode::Popular), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let entries = vec![entry("b"), entry("a")];
        let before = entries.clone();
        let _ = compute_catalog(&entries, &FilterState::new().with_sort(SortMode::PriceDesc));
        assert_eq!(entries, before);
    }

    #[test]
    fn test_query_parsing() {
        let query = CatalogQuery::new("  Ёлка, ROSE ");
        assert_eq!(query.tokens(), ["елка", "rose"]);
        assert!(CatalogQuery::new(" -- ").is_empty());
    }
}
