//! Details command implementation.

use crate::services::catalog::CatalogApi;
use crate::ui::overlay::render_details;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// Execute details command.
pub async fn execute_details<C: CatalogApi>(client: &C, id: &str, format: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("IMDb ID must not be empty");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Loading movie details...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = client.fetch_details(id).await;
    pb.finish_and_clear();
    let record = result?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&record)?),
        _ => println!("{}", render_details(&record)),
    }

    Ok(())
}
