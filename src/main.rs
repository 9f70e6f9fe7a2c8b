//! Movie Explorer CLI
//!
//! Look up movies and TV series on OMDb from the terminal.

use clap::Parser;
use movie_explorer::cli::{
    args::{Cli, Commands},
    commands::{browse, details, search},
};
use movie_explorer::models::config::{api_key_from_env, load_config, load_config_from};
use movie_explorer::preflight;
use movie_explorer::services::omdb::{OmdbClient, OmdbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Resolve the API key once and inject it into the client
    let config = match cli.config {
        Some(ref path) => load_config_from(path),
        None => load_config(),
    };
    let api_key = config.resolve_api_key(cli.api_key.as_deref(), &api_key_from_env());
    let client = OmdbClient::new(OmdbConfig::from_settings(&config.omdb, api_key));

    // Run the appropriate command
    match cli.command {
        Commands::Search {
            title,
            kind,
            year,
            page,
            format,
        } => {
            search::execute_search(
                &client,
                &title,
                kind.as_deref(),
                year.as_deref(),
                page,
                &format,
            )
            .await?;
        }

        Commands::Details { id, format } => {
            details::execute_details(&client, &id, &format).await?;
        }

        Commands::Browse { query } => {
            browse::browse(client, query).await?;
        }

        Commands::Check => {
            run_preflight_checks(&client).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("movie_explorer=debug")
    } else {
        EnvFilter::new("movie_explorer=info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Run preflight checks and fail if any fail.
async fn run_preflight_checks(client: &OmdbClient) -> anyhow::Result<()> {
    use colored::Colorize;

    println!("{}", "Running preflight checks...".bold());
    println!();

    let results = preflight::run_preflight_checks(client).await;
    preflight::print_results(&results);

    println!();

    if !preflight::all_passed(&results) {
        anyhow::bail!("Preflight checks failed. Fix the issues above and try again.");
    }

    Ok(())
}
