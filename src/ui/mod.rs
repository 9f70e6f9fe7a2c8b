//! Terminal rendering of the explorer page.

pub mod card;
pub mod overlay;
pub mod page;
