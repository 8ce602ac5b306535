//! Catalog boundary normalization.
//!
//! Catalog payloads come from the storefront API and admin imports, and are
//! loosely shaped: arrays may be missing, numbers may arrive as strings,
//! seasons may carry values the filters never offer. Everything is coerced
//! into a [`CatalogEntry`] here, with an [`Issue`] recorded for anything
//! dropped, so the ranking engine never has to second-guess its input.

use crate::entry::{CatalogEntry, Notes};
use crate::error::{Result, SearchError};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Seasons accepted from catalog data, Russian and English spellings.
pub const ALLOWED_SEASONS: [&str; 8] = [
    "Зима", "Весна", "Лето", "Осень", "Winter", "Spring", "Summer", "Autumn",
];

/// Day-parts accepted from catalog data, Russian and English spellings.
pub const ALLOWED_DAY_NIGHT: [&str; 8] = [
    "Утро", "День", "Вечер", "Ночь", "Morning", "Day", "Evening", "Night",
];

const MAX_TAGS: usize = 40;
const MAX_NOTES_PER_PHASE: usize = 60;
const MAX_SELECTIONS: usize = 4;

const FALLBACK_BRAND: &str = "—";
const FALLBACK_NAME: &str = "Без названия";

/// Severity of a normalization issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Field was repaired, entry is usable
    Warn,
    /// Entry or payload could not be read as intended
    Error,
}

/// A problem found while normalizing one catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub id: String,
    pub level: IssueLevel,
    pub field: String,
    pub message: String,
}

impl Issue {
    fn warn(id: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            level: IssueLevel::Warn,
            field: field.to_owned(),
            message: message.into(),
        }
    }

    fn error(id: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            id: id.to_owned(),
            level: IssueLevel::Error,
            field: field.to_owned(),
            message: message.into(),
        }
    }
}

/// Counts for a normalized catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub docs: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Normalized entries plus everything that had to be repaired along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogLoad {
    pub entries: Vec<CatalogEntry>,
    pub issues: Vec<Issue>,
    pub summary: LoadSummary,
}

/// Parse a catalog JSON document and normalize every entry in it.
///
/// Accepts either a bare array of entries or a paged response object with
/// an `items` array.
///
/// # Errors
/// Returns [`SearchError::Json`] when the text is not JSON and
/// [`SearchError::InvalidCatalog`] when it holds neither shape.
pub fn load_catalog_str(json: &str) -> Result<CatalogLoad> {
    let value: Value = serde_json::from_str(json)?;
    if catalog_items(&value).is_none() {
        return Err(SearchError::InvalidCatalog(
            "expected an array of entries or an object with an `items` array".into(),
        ));
    }
    Ok(normalize_catalog(&value))
}

/// Normalize a whole catalog payload. Never fails.
///
/// A payload with neither accepted shape yields no entries and a single
/// error-level issue.
pub fn normalize_catalog(raw: &Value) -> CatalogLoad {
    let mut issues = Vec::new();

    let entries = match catalog_items(raw) {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let id = entry_id(item).unwrap_or_else(|| {
                    let fallback = format!("#{index}");
                    issues.push(Issue::error(&fallback, "id", "entry has no id"));
                    fallback
                });
                normalize_entry(item, &id, &mut issues)
            })
            .collect(),
        None => {
            issues.push(Issue::error("", "catalog", "payload is not a catalog list"));
            Vec::new()
        }
    };

    for issue in &issues {
        warn!(
            id = %issue.id,
            field = %issue.field,
            level = ?issue.level,
            "{}",
            issue.message
        );
    }

    let summary = LoadSummary {
        docs: entries.len(),
        warnings: issues.iter().filter(|i| i.level == IssueLevel::Warn).count(),
        errors: issues.iter().filter(|i| i.level == IssueLevel::Error).count(),
    };

    CatalogLoad {
        entries,
        issues,
        summary,
    }
}

/// Normalize one raw entry, appending any repairs to `issues`.
pub fn normalize_entry(raw: &Value, id: &str, issues: &mut Vec<Issue>) -> CatalogEntry {
    let mut brand = as_string(raw.get("brand"));
    let mut name = as_string(raw.get("name"));

    if brand.is_empty() {
        issues.push(Issue::warn(id, "brand", "brand is empty"));
        brand = FALLBACK_BRAND.to_owned();
    }
    if name.is_empty() {
        issues.push(Issue::warn(id, "name", "name is empty"));
        name = FALLBACK_NAME.to_owned();
    }

    let seasons = allowed_selection(raw, "seasons", &ALLOWED_SEASONS, id, issues);
    let day_night = allowed_selection(raw, "dayNight", &ALLOWED_DAY_NIGHT, id, issues);

    let mut tags = unique(as_string_array(raw.get("tags")));
    tags.truncate(MAX_TAGS);

    CatalogEntry {
        id: id.to_owned(),
        brand,
        name,
        search_name_ru: as_string(raw.get("searchNameRu")),
        family: as_string(raw.get("family")),
        description: as_string(raw.get("description")),
        tags,
        notes: normalize_notes(raw.get("notes"), id, issues),
        seasons,
        day_night,
        price: as_number(first_present(raw, &["basePrice", "price"])),
        popularity: as_number(first_present(raw, &["popularity", "popularityScore"])),
        popularity_month: as_number(first_present(
            raw,
            &["popularityMonth", "popularityMonthScore"],
        )),
        longevity: clamp_rating(first_present(raw, &["longevity", "duration"])),
        sillage: clamp_rating(first_present(raw, &["sillage", "trail"])),
        order_count: as_number(raw.get("orderCount")),
    }
}

fn catalog_items(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.get("items").and_then(Value::as_array),
        _ => None,
    }
}

fn entry_id(raw: &Value) -> Option<String> {
    match raw.get("id")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Null, `false`, zero and the empty string all stand for "no value".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn normalize_notes(raw: Option<&Value>, id: &str, issues: &mut Vec<Issue>) -> Notes {
    let raw = match raw {
        Some(value) if !is_blank(value) => value,
        _ => {
            issues.push(Issue::warn(id, "notes", "notes missing, using empty phases"));
            return Notes::default();
        }
    };

    // a flat list is treated as top notes
    let flat = as_string_array(Some(raw));
    let (top, heart, base) = if flat.is_empty() {
        (
            as_string_array(raw.get("top")),
            as_string_array(raw.get("heart")),
            as_string_array(raw.get("base")),
        )
    } else {
        (flat, Vec::new(), Vec::new())
    };

    Notes {
        top: capped_unique(top, MAX_NOTES_PER_PHASE),
        heart: capped_unique(heart, MAX_NOTES_PER_PHASE),
        base: capped_unique(base, MAX_NOTES_PER_PHASE),
    }
}

fn allowed_selection(
    raw: &Value,
    field: &str,
    allowed: &[&str],
    id: &str,
    issues: &mut Vec<Issue>,
) -> Vec<String> {
    let values: Vec<String> = as_string_array(raw.get(field))
        .into_iter()
        .filter(|v| allowed.contains(&v.as_str()))
        .collect();
    let kept = capped_unique(values, MAX_SELECTIONS);

    if let Some(Value::Array(original)) = raw.get(field) {
        if original.len() != kept.len() {
            issues.push(Issue::warn(
                id,
                field,
                format!("dropped {} invalid {field} value(s)", original.len() - kept.len()),
            ));
        }
    }

    kept
}

fn first_present<'v>(raw: &'v Value, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find(|value| !value.is_null())
}

fn as_string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_owned()
}

fn as_string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

fn as_number(value: Option<&Value>) -> f64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Round and clamp a 1..=5 rating; anything unreadable becomes 1.
fn clamp_rating(value: Option<&Value>) -> u8 {
    let n = match value {
        Some(Value::Number(_)) | Some(Value::String(_)) => as_number(value),
        _ => 1.0,
    };
    // clamped into 1..=5, the cast cannot truncate
    n.round().clamp(1.0, 5.0) as u8
}

fn unique(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

fn capped_unique(values: Vec<String>, cap: usize) -> Vec<String> {
    let mut out = unique(values);
    out.truncate(cap);
    out
}
