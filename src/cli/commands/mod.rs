//! CLI command implementations.

pub mod browse;
pub mod details;
pub mod search;
