//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Check cross-field constraints that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        let search = &self.search;
        if search.max_page_size == 0 {
            return Err(Error::invalid_config_value(
                "search.max_page_size",
                "must be at least 1",
            ));
        }
        if search.page_size == 0 {
            return Err(Error::invalid_config_value(
                "search.page_size",
                "must be at least 1",
            ));
        }
        if search.page_size > search.max_page_size {
            return Err(Error::invalid_config_value(
                "search.page_size",
                format!(
                    "{} exceeds max_page_size {}",
                    search.page_size, search.max_page_size
                ),
            ));
        }
        Ok(())
    }
}

/// Which storefront a catalog belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    #[default]
    Retail,
    Wholesale,
}

impl CatalogMode {
    /// Collection name the storefront reads this catalog from
    pub fn collection(&self) -> &'static str {
        match self {
            CatalogMode::Retail => "perfumes",
            CatalogMode::Wholesale => "wholesale_perfumes",
        }
    }
}

impl fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogMode::Retail => f.write_str("retail"),
            CatalogMode::Wholesale => f.write_str("wholesale"),
        }
    }
}

/// Catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CatalogConfig {
    /// Storefront mode
    #[serde(default)]
    pub mode: CatalogMode,

    /// Default catalog file when `--catalog` is not given
    #[serde(default)]
    pub path: Option<String>,
}

/// Search defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Sort key used when none is requested
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound for a requested page size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_sort() -> String {
    "match".to_string()
}

fn default_page_size() -> usize {
    12
}

fn default_max_page_size() -> usize {
    60
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default level filter, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,

    /// Include the event target in log lines
    #[serde(default)]
    pub show_target: bool,

    /// Write log lines and error reports to stderr as JSON
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            show_target: false,
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_defaults() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.catalog.mode, CatalogMode::Retail);
        assert_eq!(schema.search.default_sort, "match");
        assert_eq!(schema.search.page_size, 12);
        assert_eq!(schema.search.max_page_size, 60);
        assert_eq!(schema.logging.level, "info");
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [catalog]
            mode = "wholesale"

            [search]
            page_size = 24
            "#,
        )
        .unwrap();

        assert_eq!(schema.catalog.mode, CatalogMode::Wholesale);
        assert_eq!(schema.catalog.mode.collection(), "wholesale_perfumes");
        assert_eq!(schema.search.page_size, 24);
        assert_eq!(schema.search.max_page_size, 60);
        assert_eq!(schema.logging, LoggingConfig::default());
    }

    #[test]
    fn test_logging_json_flag() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert!(schema.logging.json);
        assert_eq!(schema.logging.level, "info");
        assert!(!ConfigSchema::default().logging.json);
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut schema = ConfigSchema::default();
        schema.search.page_size = 0;
        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_validate_rejects_page_size_above_max() {
        let mut schema = ConfigSchema::default();
        schema.search.page_size = 61;
        let err = schema.validate().unwrap_err();
        assert!(err.message.contains("exceeds max_page_size 60"));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let result: std::result::Result<ConfigSchema, _> = toml::from_str(
            r#"
            [catalog]
            mode = "outlet"
            "#,
        );
        assert!(result.is_err());
    }
}
