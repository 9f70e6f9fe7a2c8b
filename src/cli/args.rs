//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Movie Explorer - Look up movies and TV series on OMDb
#[derive(Parser, Debug)]
#[command(name = "movie-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// OMDb API key (overrides OMDB_API_KEY and the config file)
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to config.toml (default: ~/.config/movie_explorer/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search titles and print one page of results
    Search {
        /// Title to search for
        #[arg(value_name = "TITLE")]
        title: String,

        /// Filter by type: movie, series, episode
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        kind: Option<String>,

        /// Filter by release year
        #[arg(short = 'y', long)]
        year: Option<String>,

        /// Page number (10 results per page)
        #[arg(short = 'p', long, default_value_t = 1)]
        page: u32,

        /// Output format: table, simple, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show full details for one title
    Details {
        /// IMDb ID (e.g., tt0111161)
        #[arg(value_name = "ID")]
        id: String,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Interactive explorer session
    Browse {
        /// Initial search
        #[arg(value_name = "QUERY")]
        query: Option<String>,
    },

    /// Check that the OMDb API key is configured and accepted
    Check,
}
