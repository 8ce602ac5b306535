//! Normalize command - show the search forms of a piece of text

use anyhow::Result;
use owo_colors::OwoColorize;
use parfum_search::{cyrillic_to_latin, latin_to_cyrillic, normalize, tokens};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Serialize)]
struct NormalizeOutput<'a> {
    input: &'a str,
    normalized: String,
    latin: String,
    cyrillic: String,
    tokens: Vec<String>,
}

/// Print the normalized text and both transliterations
pub fn run(text: &str, json: bool) -> Result<ExitCode> {
    let normalized = normalize(text);
    let output = NormalizeOutput {
        input: text,
        latin: cyrillic_to_latin(&normalized),
        cyrillic: latin_to_cyrillic(&normalized),
        tokens: tokens(&normalized).map(str::to_owned).collect(),
        normalized,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{:<11} {}", "normalized".dimmed(), output.normalized);
    println!("{:<11} {}", "latin".dimmed(), output.latin);
    println!("{:<11} {}", "cyrillic".dimmed(), output.cyrillic);
    println!("{:<11} {}", "tokens".dimmed(), output.tokens.join(" | "));
    Ok(ExitCode::SUCCESS)
}
