//! Utility modules.

pub mod text;
