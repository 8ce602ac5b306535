//! parfum-catalog: search and validate perfume catalog exports.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use parfum_cli::output::Status;
use parfum_core::config::Config;
use parfum_telemetry::TelemetryConfig;
use std::process::ExitCode;

mod catalog;
mod commands;

use commands::{normalize, search, validate};

/// Search and validate perfume catalog exports
#[derive(Parser)]
#[command(name = "parfum-catalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (defaults to .parfum.toml discovery)
    #[arg(long, global = true, env = "PARFUM_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a catalog and print one page of results
    Search(search::SearchArgs),

    /// Normalize a catalog and report repaired fields
    Validate {
        /// Catalog JSON file (defaults to [catalog] path)
        #[arg(short, long)]
        catalog: Option<std::path::PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how text is normalized and transliterated for search
    Normalize {
        /// Text to normalize
        #[arg(required = true)]
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            Status::report(&e);
            return ExitCode::from(exit_byte(e.exit_code()));
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    let json_logs = config.schema.logging.json;
    let telemetry = TelemetryConfig {
        show_target: config.schema.logging.show_target,
        json: json_logs,
        ..TelemetryConfig::with_level(level)
    };
    if let Err(e) = parfum_telemetry::init_with_config(telemetry) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded config");
    }

    let result = match cli.command {
        Commands::Search(args) => search::run(&args, &config),
        Commands::Validate { catalog, json } => validate::run(catalog.as_deref(), json, &config),
        Commands::Normalize { text, json } => normalize::run(&text.join(" "), json),
    };

    parfum_telemetry::timings().log_summary();

    match result {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<parfum_core::Error>() {
            Some(err) => {
                report(err, json_logs);
                ExitCode::from(exit_byte(err.exit_code()))
            }
            None => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Print a coded error, as one JSON line when logs are JSON.
fn report(err: &parfum_core::Error, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(&err.to_report()) {
            eprintln!("{line}");
            return;
        }
    }
    Status::report(err);
}

fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
