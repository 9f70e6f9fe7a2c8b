//! External service clients.

pub mod catalog;
pub mod omdb;
