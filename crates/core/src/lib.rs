//! Core utilities for Parfum catalog tools
//!
//! This crate provides functionality shared by the catalog binaries:
//!
//! - **Error handling**: Errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use parfum_core::config::Config;
//!
//! let config = Config::load(None)?;
//! println!("page size: {}", config.schema.search.page_size);
//! # Ok::<(), parfum_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{CatalogMode, Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, ErrorReport, Result, ResultExt};
}
