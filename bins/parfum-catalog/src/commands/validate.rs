//! Validate command - report what the boundary normalizer repaired

use crate::catalog;
use anyhow::Result;
use owo_colors::OwoColorize;
use parfum_cli::output::{format_count, format_duration, Status};
use parfum_core::config::{CatalogMode, Config};
use parfum_core::error::exit_codes;
use parfum_search::{Issue, IssueLevel, LoadSummary};
use parfum_telemetry::Timer;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

#[derive(Serialize)]
struct ValidateOutput<'a> {
    path: String,
    mode: CatalogMode,
    collection: &'static str,
    valid: bool,
    summary: LoadSummary,
    issues: &'a [Issue],
}

/// Run catalog validation
///
/// Exits with a validation error code when any entry has error-level issues.
pub fn run(catalog: Option<&Path>, json: bool, config: &Config) -> Result<ExitCode> {
    let path = catalog::resolve_path(catalog, config)?;

    let timer = Timer::start("validate");
    let load = catalog::load(&path)?;
    let elapsed = timer.stop();

    let valid = load.summary.errors == 0;
    let code = if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(exit_codes::VALIDATION_ERROR as u8)
    };

    if json {
        let output = ValidateOutput {
            path: path.display().to_string(),
            mode: config.schema.catalog.mode,
            collection: config.schema.catalog.mode.collection(),
            valid,
            summary: load.summary,
            issues: &load.issues,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(code);
    }

    let mode = config.schema.catalog.mode;
    Status::header(&format!("{} ({mode}, {})", path.display(), mode.collection()));
    println!(
        "{}, {}, {} in {}",
        format_count(load.summary.docs, "perfume", "perfumes"),
        format_count(load.summary.warnings, "warning", "warnings"),
        format_count(load.summary.errors, "error", "errors"),
        format_duration(elapsed),
    );

    if !load.issues.is_empty() {
        println!();
        for issue in &load.issues {
            print_issue(issue);
        }
    }

    println!();
    if valid {
        Status::success("Catalog is usable");
    } else {
        Status::error(&format!(
            "{} could not be read as intended",
            format_count(load.summary.errors, "entry", "entries")
        ));
    }

    Ok(code)
}

fn print_issue(issue: &Issue) {
    let marker = match issue.level {
        IssueLevel::Warn => "warn ".yellow().to_string(),
        IssueLevel::Error => "error".red().to_string(),
    };
    println!(
        "  {} {:<12} {:<12} {}",
        marker,
        issue.id,
        issue.field.dimmed(),
        issue.message
    );
}
