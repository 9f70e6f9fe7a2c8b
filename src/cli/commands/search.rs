//! Search command implementation.

use crate::core::input::{parse_kind_filter, validate_year};
use crate::models::catalog::{Query, SearchPage, PAGE_SIZE};
use crate::services::catalog::CatalogApi;
use crate::utils::text::truncate;
use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// Execute search command.
pub async fn execute_search<C: CatalogApi>(
    client: &C,
    title: &str,
    kind: Option<&str>,
    year: Option<&str>,
    page: u32,
    format: &str,
) -> Result<()> {
    let query = build_query(title, kind, year, page)?;
    if !query.has_text() {
        anyhow::bail!("Search title must not be empty");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Searching movies...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = client.search(&query).await;
    pb.finish_and_clear();
    let results = result?;

    tracing::info!(
        "Search {:?} page {}: {} of {} results",
        query.text,
        query.page,
        results.items.len(),
        results.total_count
    );

    match format {
        "json" => print_json(&results)?,
        "simple" => print_simple(&results),
        _ => print_table(&query, &results),
    }

    Ok(())
}

/// Build a query from command line values.
pub fn build_query(title: &str, kind: Option<&str>, year: Option<&str>, page: u32) -> Result<Query> {
    let kind = parse_kind_filter(kind.unwrap_or(""))?;
    let year = year.map(validate_year).transpose()?;
    Ok(Query::new(title.trim())
        .with_kind(kind)
        .with_year(year)
        .with_page(page))
}

/// Print results as JSON.
fn print_json(results: &SearchPage) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        #[serde(flatten)]
        page: &'a SearchPage,
        total_pages: u32,
    }

    let output = JsonOutput {
        page: results,
        total_pages: results.total_pages(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results in simple format.
fn print_simple(results: &SearchPage) {
    if results.items.is_empty() {
        println!("No results found.");
        return;
    }

    for item in &results.items {
        println!("[{}] {} ({}) - {}", item.id, item.title, item.year, item.kind);
    }
}

/// Print results as table.
fn print_table(query: &Query, results: &SearchPage) {
    if results.items.is_empty() {
        println!("{}", "No results found.".yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} results:", results.total_count).bold().cyan()
    );
    println!();
    println!(
        " {:>4} | {:<11} | {:<9} | {:<8} | {}",
        "#", "Year", "Type", "IMDb", "Title"
    );
    println!("{}", "-".repeat(80));

    let offset = result_offset(query.page);
    for (i, item) in results.items.iter().enumerate() {
        let poster = if item.poster_url.is_some() { "" } else { " (no poster)" };
        println!(
            " {:>4} | {:<11} | {:<9} | {:<8} | {}{}",
            offset + i + 1,
            item.year,
            item.kind.to_string(),
            item.id,
            truncate(&item.title, 40),
            poster.dimmed()
        );
    }

    println!();
    println!("Page {} / {}", query.page, results.total_pages());
}

/// Number of results that come before `page`.
fn result_offset(page: u32) -> usize {
    (page.max(1) as usize - 1).saturating_mul(PAGE_SIZE as usize)
}
