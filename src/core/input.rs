//! Filter input sanitation.

use crate::models::catalog::MediaKind;
use crate::{Error, Result};

/// Maximum length of the year filter.
pub const YEAR_MAX_LEN: usize = 4;

/// Sanitize raw year input: keep digits only, at most 4 of them.
///
/// `"19a9b5"` becomes `"1995"`.
pub fn sanitize_year_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(YEAR_MAX_LEN)
        .collect()
}

/// Validate a year filter before it goes on the wire.
pub fn validate_year(year: &str) -> Result<&str> {
    if year.is_empty() || year.len() > YEAR_MAX_LEN || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidYear(year.to_string()));
    }
    Ok(year)
}

/// Parse a type filter. Empty input and "all" clear the filter.
pub fn parse_kind_filter(raw: &str) -> Result<Option<MediaKind>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "all" => Ok(None),
        other => MediaKind::FILTERS
            .into_iter()
            .find(|kind| kind.as_filter() == Some(other))
            .map(Some)
            .ok_or_else(|| Error::InvalidMediaType(raw.to_string())),
    }
}
