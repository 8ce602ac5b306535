//! Catalog entry model.

use serde::{Deserialize, Serialize};

/// Fragrance notes grouped by evaporation phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Notes {
    /// Top notes
    pub top: Vec<String>,
    /// Heart notes
    pub heart: Vec<String>,
    /// Base notes
    pub base: Vec<String>,
}

impl Notes {
    /// Iterate all notes, top to base.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.top
            .iter()
            .chain(&self.heart)
            .chain(&self.base)
            .map(String::as_str)
    }

    /// Total number of notes across all phases.
    pub fn len(&self) -> usize {
        self.top.len() + self.heart.len() + self.base.len()
    }

    /// True when no phase has any note.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A strictly typed catalog entry.
///
/// Raw catalog payloads go through [`crate::normalize_entry`] first; the
/// ranking engine assumes every field here is well formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub search_name_ru: String,
    pub family: String,
    pub description: String,
    pub tags: Vec<String>,
    pub notes: Notes,
    pub seasons: Vec<String>,
    pub day_night: Vec<String>,
    pub price: f64,
    pub popularity: f64,
    pub popularity_month: f64,
    /// 1..=5
    pub longevity: u8,
    /// 1..=5
    pub sillage: u8,
    pub order_count: f64,
}

impl CatalogEntry {
    /// Create an entry with the given id and everything else empty.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Raw searchable text: names, description, tags and every note, space separated.
    pub fn search_text(&self) -> String {
        let fields = [
            self.brand.as_str(),
            self.name.as_str(),
            self.search_name_ru.as_str(),
            self.family.as_str(),
            self.description.as_str(),
        ];

        fields
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
            .chain(self.notes.iter())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
