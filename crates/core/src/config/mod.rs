//! Configuration loading and schema definitions

mod loader;
mod schema;

pub use loader::{Config, CONFIG_FILE_NAMES};
pub use schema::*;
