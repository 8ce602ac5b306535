//! Filter state and sort modes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// How results are ordered.
///
/// Parsing never fails: unknown keys fall back to [`SortMode::Match`],
/// which orders by descending score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Descending score
    #[default]
    Match,
    /// Descending popularity, then score
    Popular,
    /// Descending monthly popularity, then overall popularity
    PopularMonth,
    /// Ascending price
    PriceAsc,
    /// Descending price
    PriceDesc,
    /// Descending longevity
    Longevity,
    /// Descending sillage
    Sillage,
    /// Descending order count, then score
    Hits,
    /// Position in the preset id list
    Preset,
}

impl SortMode {
    /// All modes, in the order the storefront lists them.
    pub const ALL: [SortMode; 9] = [
        SortMode::Match,
        SortMode::Popular,
        SortMode::PopularMonth,
        SortMode::PriceAsc,
        SortMode::PriceDesc,
        SortMode::Longevity,
        SortMode::Sillage,
        SortMode::Hits,
        SortMode::Preset,
    ];

    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::Match => "match",
            SortMode::Popular => "popular",
            SortMode::PopularMonth => "popular_month",
            SortMode::PriceAsc => "price_asc",
            SortMode::PriceDesc => "price_desc",
            SortMode::Longevity => "longevity",
            SortMode::Sillage => "sillage",
            SortMode::Hits => "hits",
            SortMode::Preset => "preset",
        }
    }

    /// Parse a wire name, falling back to [`SortMode::Match`].
    pub fn parse(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == key)
            .unwrap_or_default()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for SortMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(key) => Self::parse(&key),
            _ => Self::default(),
        })
    }
}

/// Immutable snapshot of every catalog filter control.
///
/// Empty lists and an empty query mean "no constraint on this axis".
/// Deserializing never fails on a known key: nulls and wrong-typed values
/// read as the empty value for that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Raw search box text
    #[serde(alias = "q", deserialize_with = "lenient_text")]
    pub query: String,
    /// Notes an entry should have
    #[serde(deserialize_with = "lenient_list")]
    pub must_notes: Vec<String>,
    /// Notes an entry should not have
    #[serde(deserialize_with = "lenient_list")]
    pub avoid_notes: Vec<String>,
    /// Selected seasons
    #[serde(deserialize_with = "lenient_list")]
    pub seasons: Vec<String>,
    /// Selected day-parts
    #[serde(deserialize_with = "lenient_list")]
    pub day_night: Vec<String>,
    /// Ordering
    pub sort: SortMode,
    /// Curated subset and its display order.
    ///
    /// A repeated id keeps only its first occurrence.
    #[serde(deserialize_with = "lenient_list")]
    pub preset_ids: Vec<String>,
}

impl FilterState {
    /// Filter with no constraints, ordered by score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from URL query parameters as the catalog endpoint receives them.
    ///
    /// List parameters are comma separated; unknown keys are ignored.
    ///
    /// # Example
    /// ```
    /// use parfum_search::{FilterState, SortMode};
    ///
    /// let filter = FilterState::from_query_pairs([
    ///     ("q", "ладан"),
    ///     ("mustNotes", "oud, incense,"),
    ///     ("sort", "popular"),
    /// ]);
    /// assert_eq!(filter.must_notes, vec!["oud", "incense"]);
    /// assert_eq!(filter.sort, SortMode::Popular);
    /// ```
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "q" | "query" => filter.query = value.trim().to_owned(),
                "mustNotes" => filter.must_notes = split_list(value),
                "avoidNotes" => filter.avoid_notes = split_list(value),
                "seasons" => filter.seasons = split_list(value),
                "dayNight" => filter.day_night = split_list(value),
                "sort" => filter.sort = SortMode::parse(value),
                "presetIds" => filter.preset_ids = split_list(value),
                _ => {}
            }
        }
        filter
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_must_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.must_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_avoid_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.avoid_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seasons<I, S>(mut self, seasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seasons = seasons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_day_night<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.day_night = parts.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_preset_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preset_ids = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Split a comma separated list, trimming items and dropping empties.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Accepts an array of strings or a comma separated string; anything else is empty.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect(),
        Value::String(raw) => split_list(&raw),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_round_trip_names() {
        for mode in SortMode::ALL {
            assert_eq!(SortMode::parse(mode.as_str()), mode);
            assert_eq!(mode.to_string(), mode.as_str());
        }
    }

    #[test]
    fn test_unknown_sort_falls_back_to_match() {
        assert_eq!(SortMode::parse("newest"), SortMode::Match);
        assert_eq!(SortMode::parse(""), SortMode::Match);
        assert_eq!("priceAsc".parse::<SortMode>().unwrap(), SortMode::Match);
        assert_eq!(" hits ".parse::<SortMode>().unwrap(), SortMode::Hits);
    }

    #[test]
    fn test_sort_mode_serde() {
        let json = serde_json::to_string(&SortMode::PopularMonth).unwrap();
        assert_eq!(json, r#""popular_month""#);
        let mode: SortMode = serde_json::from_str(r#""whatever""#).unwrap();
        assert_eq!(mode, SortMode::Match);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" oud, ,rose ,"), vec!["oud", "rose"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_from_query_pairs() {
        let filter = FilterState::from_query_pairs([
            ("q", "  tom ford "),
            ("avoidNotes", "musk"),
            ("seasons", "Winter,Autumn"),
            ("dayNight", "Night"),
            ("presetIds", "p3,p1"),
            ("mode", "retail"),
        ]);

        assert_eq!(filter.query, "tom ford");
        assert_eq!(filter.avoid_notes, vec!["musk"]);
        assert_eq!(filter.seasons, vec!["Winter", "Autumn"]);
        assert_eq!(filter.day_night, vec!["Night"]);
        assert_eq!(filter.preset_ids, vec!["p3", "p1"]);
        assert_eq!(filter.sort, SortMode::Match);
    }

    #[test]
    fn test_filter_deserialize() {
        let filter: FilterState =
            serde_json::from_str(r#"{"q":"oud","mustNotes":["oud"],"sort":"hits"}"#).unwrap();
        assert_eq!(filter.query, "oud");
        assert_eq!(filter.must_notes, vec!["oud"]);
        assert_eq!(filter.sort, SortMode::Hits);
        assert!(filter.preset_ids.is_empty());
    }

    #[test]
    fn test_sort_mode_from_non_string() {
        let mode: SortMode = serde_json::from_str("null").unwrap();
        assert_eq!(mode, SortMode::Match);
        let mode: SortMode = serde_json::from_str("5").unwrap();
        assert_eq!(mode, SortMode::Match);
    }

    #[test]
    fn test_filter_deserialize_null_and_wrong_types() {
        let filter: FilterState = serde_json::from_str(
            r#"{"q":null,"mustNotes":null,"avoidNotes":7,"seasons":["Winter",3,""],"sort":null,"presetIds":"p2, p1"}"#,
        )
        .unwrap();
        assert_eq!(filter.query, "");
        assert!(filter.must_notes.is_empty());
        assert!(filter.avoid_notes.is_empty());
        assert_eq!(filter.seasons, vec!["Winter"]);
        assert_eq!(filter.sort, SortMode::Match);
        assert_eq!(filter.preset_ids, vec!["p2", "p1"]);
    }

    #[test]
    fn test_builder() {
        let filter = FilterState::new()
            .with_query("rose")
            .with_must_notes(["rose"])
            .with_sort(SortMode::PriceAsc);
        assert_eq!(filter.query, "rose");
        assert_eq!(filter.must_notes, vec!["rose"]);
        assert_eq!(filter.sort, SortMode::PriceAsc);
    }
}
