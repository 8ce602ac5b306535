//! Search command - rank a catalog and print one page

use crate::catalog;
use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use parfum_cli::output::{format_count, format_price, format_score, rating_dots, truncate, Status};
use parfum_core::config::Config;
use parfum_search::{compute_page, FilterState, Page, PageLink, PageRequest, SortMode};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Filters, sort and paging for one search
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Catalog JSON file (defaults to [catalog] path)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Search text
    #[arg(short, long, default_value = "")]
    query: String,

    /// Notes that must be present (comma separated or repeated)
    #[arg(long, value_delimiter = ',')]
    must: Vec<String>,

    /// Notes to avoid
    #[arg(long, value_delimiter = ',')]
    avoid: Vec<String>,

    /// Preferred seasons
    #[arg(long, value_delimiter = ',')]
    season: Vec<String>,

    /// Preferred times of day
    #[arg(long, value_delimiter = ',')]
    day_night: Vec<String>,

    /// Sort key (match, popular, popular_month, price_asc, price_desc,
    /// longevity, sillage, hits, preset)
    #[arg(short, long)]
    sort: Option<String>,

    /// Restrict to these ids, in this order for the preset sort
    #[arg(long, value_delimiter = ',')]
    preset: Vec<String>,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Items per page (defaults to [search] page_size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn filter(&self, default_sort: &str) -> FilterState {
        let sort_key = self.sort.as_deref().unwrap_or(default_sort);
        let sort = SortMode::parse(sort_key);
        if sort.as_str() != sort_key.trim() {
            tracing::warn!(sort = %sort_key, fallback = %sort, "Unknown sort key");
        }

        FilterState::new()
            .with_query(self.query.as_str())
            .with_must_notes(&self.must)
            .with_avoid_notes(&self.avoid)
            .with_seasons(&self.season)
            .with_day_night(&self.day_night)
            .with_preset_ids(&self.preset)
            .with_sort(sort)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput<'a> {
    sort: SortMode,
    #[serde(flatten)]
    page: &'a Page<'a>,
    links: Vec<String>,
}

/// Run a search
pub fn run(args: &SearchArgs, config: &Config) -> Result<ExitCode> {
    let path = catalog::resolve_path(args.catalog.as_deref(), config)?;
    let load = catalog::load(&path)?;

    let search = &config.schema.search;
    let filter = args.filter(&search.default_sort);
    let request = PageRequest::bounded(
        args.page,
        args.page_size.unwrap_or(search.page_size),
        search.max_page_size,
    );

    let page = {
        parfum_telemetry::timed_span!("search", sort = %filter.sort);
        compute_page(&load.entries, &filter, request)
    };

    if args.json {
        let output = SearchOutput {
            sort: filter.sort,
            page: &page,
            links: page.links().iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(ExitCode::SUCCESS);
    }

    print_page(&page, filter.sort);
    Ok(ExitCode::SUCCESS)
}

fn print_page(page: &Page<'_>, sort: SortMode) {
    if page.total == 0 {
        Status::warning("No perfumes match these filters");
        return;
    }

    Status::info(&format!(
        "Found {} (page {} of {}, sorted by {})",
        format_count(page.total, "perfume", "perfumes"),
        page.page,
        page.total_pages,
        sort
    ));
    println!();

    let offset = (page.page - 1) * page.page_size;
    for (i, hit) in page.items.iter().enumerate() {
        let entry = hit.entry;
        let title = truncate(&format!("{} {}", entry.brand, entry.name), 40);
        println!(
            "{:>4}. {:<40} {:>6}  {:>8}  {} {}",
            offset + i + 1,
            title.bold(),
            format_score(hit.score),
            format_price(entry.price),
            rating_dots(entry.longevity),
            rating_dots(entry.sillage).dimmed(),
        );
        let notes: Vec<&str> = entry.notes.iter().collect();
        if !notes.is_empty() {
            println!("      {} {}", entry.id.dimmed(), truncate(&notes.join(", "), 60).dimmed());
        } else {
            println!("      {}", entry.id.dimmed());
        }
    }

    if page.total_pages > 1 {
        let links: Vec<String> = page
            .links()
            .iter()
            .map(|link| match link {
                PageLink::Page(n) if *n == page.page => format!("[{n}]"),
                other => other.to_string(),
            })
            .collect();
        println!();
        println!("Pages: {}", links.join(" "));
    }
}
