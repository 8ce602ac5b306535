//! Error types for the search crate.
//!
//! The ranking engine itself never fails; these errors only surface when a
//! caller asks for strict catalog loading.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Catalog payload has an unexpected shape
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error code for integration with parfum-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Catalog payload has an unexpected shape
    InvalidCatalog = 11001,
    /// JSON parsing error
    JsonParsing = 11002,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidCatalog(_) => SearchErrorCode::InvalidCatalog,
            SearchError::Json(_) => SearchErrorCode::JsonParsing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = SearchError::InvalidCatalog("expected array".into());
        assert_eq!(err.code(), SearchErrorCode::InvalidCatalog);
        assert_eq!(err.code() as u32, 11001);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SearchError = json_err.into();
        assert_eq!(err.code(), SearchErrorCode::JsonParsing);
    }

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidCatalog("expected array".into());
        assert_eq!(err.to_string(), "Invalid catalog: expected array");
    }
}
