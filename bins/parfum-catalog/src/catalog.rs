//! Catalog file loading.

use parfum_core::config::Config;
use parfum_core::{Error, Result};
use parfum_search::{load_catalog_str, CatalogLoad, SearchError};
use std::path::{Path, PathBuf};

/// Pick the catalog file from the command line or the config.
pub fn resolve_path(arg: Option<&Path>, config: &Config) -> Result<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.schema.catalog.path.as_ref().map(PathBuf::from))
        .ok_or_else(|| {
            Error::catalog("No catalog file given")
                .with_suggestion("Pass --catalog <file> or set [catalog] path in .parfum.toml")
        })
}

/// Read and normalize a catalog export.
pub fn load(path: &Path) -> Result<CatalogLoad> {
    let _timer = parfum_telemetry::Timer::start("catalog_load");

    let text = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::catalog_not_found(path)
        } else {
            Error::from(e).with_context(format!("Reading {}", path.display()))
        }
    })?;

    let load = load_catalog_str(&text).map_err(|e| {
        let context = format!("Loading {}", path.display());
        match e {
            SearchError::Json(source) => Error::from(source).with_context(context),
            SearchError::InvalidCatalog(message) => {
                Error::invalid_catalog_shape(message).with_context(context)
            }
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        docs = load.summary.docs,
        warnings = load.summary.warnings,
        errors = load.summary.errors,
        "Catalog loaded"
    );

    Ok(load)
}
