//! Movie Explorer Library
//!
//! Search the OMDb catalog for movies and TV series, page through the results
//! and open full details for a single title.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod ui;
pub mod utils;

pub use error::{Error, Result};
