//! Relevance scoring against note, season and day-part filters.

use crate::entry::CatalogEntry;
use crate::filter::FilterState;
use std::collections::HashSet;

/// Lowest score an entry can get.
pub const MIN_SCORE: f64 = -999.0;
/// Highest score an entry can get.
pub const MAX_SCORE: f64 = 999.0;

/// Weight of each requested note the entry has.
pub const MUST_NOTE_WEIGHT: f64 = 4.0;
/// Weight of each selected season the entry suits.
pub const SEASON_WEIGHT: f64 = 1.8;
/// Weight of each selected day-part the entry suits.
pub const DAY_NIGHT_WEIGHT: f64 = 1.4;
/// Weight of the fraction of requested notes covered.
pub const COVERAGE_WEIGHT: f64 = 2.0;
/// Penalty for each unwanted note the entry has.
pub const AVOID_NOTE_PENALTY: f64 = 2.8;

/// Score an entry against the active filters.
///
/// ```text
/// must_hits*4 + season_hits*1.8 + day_night_hits*1.4
///     + (must_hits / must.len())*2 - avoid_hits*2.8
/// ```
///
/// clamped to [`MIN_SCORE`]..=[`MAX_SCORE`]. Every filter value counts,
/// so a note listed twice in `must` hits twice.
///
/// # Example
/// ```
/// use parfum_search::{score_entry, CatalogEntry};
///
/// let mut entry = CatalogEntry::new("a");
/// entry.notes.top = vec!["bergamot".into()];
/// entry.seasons = vec!["Summer".into()];
///
/// let must = vec!["bergamot".to_string()];
/// let seasons = vec!["Summer".to_string()];
/// let score = score_entry(&entry, &must, &[], &seasons, &[]);
/// assert!((score - 7.8).abs() < 1e-9);
/// ```
pub fn score_entry(
    entry: &CatalogEntry,
    must: &[String],
    avoid: &[String],
    seasons: &[String],
    day_night: &[String],
) -> f64 {
    let all_notes: HashSet<&str> = entry.notes.iter().collect();

    let must_hits = count_hits(must, |n| all_notes.contains(n));
    let avoid_hits = count_hits(avoid, |n| all_notes.contains(n));
    let season_hits = count_hits(seasons, |s| entry.seasons.iter().any(|e| e == s));
    let day_night_hits = count_hits(day_night, |d| entry.day_night.iter().any(|e| e == d));

    let coverage = if must.is_empty() {
        0.0
    } else {
        must_hits / must.len() as f64
    };

    let score = must_hits * MUST_NOTE_WEIGHT
        + season_hits * SEASON_WEIGHT
        + day_night_hits * DAY_NIGHT_WEIGHT
        + coverage * COVERAGE_WEIGHT
        - avoid_hits * AVOID_NOTE_PENALTY;

    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// The scoring lists of a [`FilterState`], borrowed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NoteFilter<'a> {
    pub must: &'a [String],
    pub avoid: &'a [String],
    pub seasons: &'a [String],
    pub day_night: &'a [String],
}

impl<'a> NoteFilter<'a> {
    pub fn from_filter(filter: &'a FilterState) -> Self {
        Self {
            must: &filter.must_notes,
            avoid: &filter.avoid_notes,
            seasons: &filter.seasons,
            day_night: &filter.day_night,
        }
    }

    /// Score `entry` with [`score_entry`].
    pub fn score(&self, entry: &CatalogEntry) -> f64 {
        score_entry(entry, self.must, self.avoid, self.seasons, self.day_night)
    }
}

fn count_hits(values: &[String], mut present: impl FnMut(&str) -> bool) -> f64 {
    values.iter().filter(|v| present(v.as_str())).count() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_owned()).collect()
    }

    fn entry() -> CatalogEntry {
        let mut entry = CatalogEntry::new("p1");
        entry.notes.top = strings(&["bergamot", "pink pepper"]);
        entry.notes.heart = strings(&["rose"]);
        entry.notes.base = strings(&["oud", "musk"]);
        entry.seasons = strings(&["Autumn", "Winter"]);
        entry.day_night = strings(&["Evening", "Night"]);
        entry
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_note_filter_borrows_filter_lists() {
        let filter = FilterState::new()
            .with_must_notes(["oud", "amber"])
            .with_avoid_notes(["musk"])
            .with_day_night(["Night"]);
        let notes = NoteFilter::from_filter(&filter);

        assert_eq!(notes.must.len(), 2);
        assert!(notes.seasons.is_empty());
        // 4 + 0.5*2 + 1.4 - 2.8
        assert!(approx(notes.score(&entry()), 3.6));
    }

    #[test]
    fn test_no_filters_scores_zero() {
        assert_eq!(score_entry(&entry(), &[], &[], &[], &[]), 0.0);
    }

    #[test]
    fn test_must_hits_and_coverage() {
        // 1 of 2 requested notes: 4 + 0.5*2
        let score = score_entry(&entry(), &strings(&["oud", "vanilla"]), &[], &[], &[]);
        assert!(approx(score, 5.0));

        // 2 of 2: 8 + 2
        let score = score_entry(&entry(), &strings(&["oud", "rose"]), &[], &[], &[]);
        assert!(approx(score, 10.0));
    }

    #[test]
    fn test_season_and_day_night() {
        let score = score_entry(
            &entry(),
            &[],
            &[],
            &strings(&["Winter", "Summer"]),
            &strings(&["Night", "Evening"]),
        );
        assert!(approx(score, 1.8 + 2.0 * 1.4));
    }

    #[test]
    fn test_avoid_penalty() {
        let score = score_entry(&entry(), &[], &strings(&["musk", "tonka"]), &[], &[]);
        assert!(approx(score, -2.8));
    }

    #[test]
    fn test_duplicate_filter_values_count_twice() {
        let score = score_entry(&entry(), &strings(&["oud", "oud"]), &[], &[], &[]);
        assert!(approx(score, 10.0));
    }

    #[test]
    fn test_clamped() {
        let avoid: Vec<String> = std::iter::repeat_n("oud".to_string(), 1000).collect();
        assert_eq!(score_entry(&entry(), &[], &avoid, &[], &[]), MIN_SCORE);

        let must: Vec<String> = std::iter::repeat_n("oud".to_string(), 1000).collect();
        assert_eq!(score_entry(&entry(), &must, &[], &[], &[]), MAX_SCORE);
    }
}
