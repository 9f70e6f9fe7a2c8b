//! Catalog data models.

use serde::{Deserialize, Serialize};

/// Literal the catalog service uses for an absent field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed page size of the catalog search endpoint.
pub const PAGE_SIZE: u32 = 10;

/// Whether a raw catalog value means "absent".
pub fn is_not_available(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(NOT_AVAILABLE)
}

/// Normalize a raw catalog value, mapping the sentinel to `None`.
pub fn available(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_not_available(v))
}

/// Media kind enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Episode,
    /// Any kind the catalog returns that cannot be used as a filter.
    #[serde(other)]
    Other,
}

impl MediaKind {
    /// Kinds accepted as a search filter.
    pub const FILTERS: [MediaKind; 3] = [MediaKind::Movie, MediaKind::Series, MediaKind::Episode];

    /// Parse a raw catalog `Type` value.
    pub fn from_catalog(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "movie" => MediaKind::Movie,
            "series" => MediaKind::Series,
            "episode" => MediaKind::Episode,
            _ => MediaKind::Other,
        }
    }

    /// Query parameter value, `None` for kinds that cannot filter.
    pub fn as_filter(&self) -> Option<&'static str> {
        match self {
            MediaKind::Movie => Some("movie"),
            MediaKind::Series => Some("series"),
            MediaKind::Episode => Some("episode"),
            MediaKind::Other => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Series => write!(f, "series"),
            MediaKind::Episode => write!(f, "episode"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// Lightweight search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Catalog identifier (IMDb ID).
    pub id: String,
    pub title: String,
    /// Free-form year, may be a range such as "2008–2013".
    pub year: String,
    pub kind: MediaKind,
    /// Poster URL, `None` when the catalog has no artwork.
    pub poster_url: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<SearchResultItem>,
    /// Total matches across all pages.
    pub total_count: u32,
}

impl SearchPage {
    /// An empty page, used for "no results" and "too many results".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pages for this result set, never less than one.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count)
    }
}

/// Page count for `total_count` matches at the fixed page size.
pub fn total_pages(total_count: u32) -> u32 {
    total_count.div_ceil(PAGE_SIZE).max(1)
}

/// Rating from a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Source name (e.g., "Internet Movie Database").
    pub source: String,
    /// Value as reported (e.g., "9.3/10", "91%").
    pub value: String,
}

/// Full detail record for a single title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub kind: Option<MediaKind>,
    pub poster_url: Option<String>,
    /// Rating classification (e.g., "R", "PG-13").
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    /// Comma-joined genre list.
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub ratings: Vec<Rating>,
    pub metascore: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
    /// Whether the catalog reported a successful lookup.
    pub found: bool,
}

impl DetailRecord {
    /// Genres split out of the comma-joined list.
    pub fn genres(&self) -> Vec<&str> {
        self.genre
            .as_deref()
            .map(|g| {
                g.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Search query with filters and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub kind: Option<MediaKind>,
    /// Year filter, at most 4 digits.
    pub year: Option<String>,
    /// 1-based page number.
    pub page: u32,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            year: None,
            page: 1,
        }
    }
}

impl Query {
    /// Create a page-1 query for `text` with no filters.
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: Option<MediaKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_year<S: Into<String>>(mut self, year: Option<S>) -> Self {
        self.year = year.map(Into::into);
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Whether the text is non-empty after trimming.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}
