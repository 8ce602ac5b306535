//! Terminal output helpers for Parfum catalog tools
//!
//! Provides shared CLI functionality:
//! - Status messages and error reports
//! - Formatting for scores, prices, ratings and counts

#![warn(missing_docs)]

pub mod output;
