//! Error types for the movie explorer.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the movie explorer.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("OMDb API key not configured. Set OMDB_API_KEY environment variable")]
    ApiKeyMissing,

    // Input errors
    #[error("Invalid year filter: {0:?} (expected up to 4 digits)")]
    InvalidYear(String),

    #[error("Invalid media type: {0:?} (expected movie, series or episode)")]
    InvalidMediaType(String),

    // OMDb errors
    #[error("OMDb request failed with HTTP status {0}")]
    TransportStatus(u16),

    #[error("OMDb lookup failed: {0}")]
    LookupFailed(String),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this error came from talking to the catalog service.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::TransportStatus(_) | Error::LookupFailed(_) | Error::Http(_) | Error::Json(_)
        )
    }

    /// Whether this error is a missing-credential error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ApiKeyMissing)
    }
}
