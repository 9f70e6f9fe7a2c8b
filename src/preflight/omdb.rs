//! OMDb API preflight checks.

use super::CheckResult;
use crate::services::catalog::CatalogApi;
use crate::services::omdb::OmdbClient;

/// Check that an API key is configured.
pub fn check_credential(client: &OmdbClient) -> CheckResult {
    if client.has_credential() {
        CheckResult::ok("OMDb API key", "configured")
    } else {
        CheckResult::fail(
            "OMDb API key",
            "not configured",
            "Set OMDB_API_KEY, pass --api-key, or add api_key to config.toml",
        )
    }
}

/// Check if OMDb accepts the configured key.
pub async fn check(client: &OmdbClient) -> CheckResult {
    match client.verify_api_key().await {
        Ok(true) => CheckResult::ok("OMDb API", "connected"),
        Ok(false) => CheckResult::fail(
            "OMDb API",
            "key rejected or service unreachable",
            "Check your OMDb API key and network connection",
        ),
        Err(e) if e.is_configuration() => CheckResult::fail(
            "OMDb API",
            "skipped, no API key",
            "Get a free key at https://www.omdbapi.com/apikey.aspx",
        ),
        Err(e) => CheckResult::fail(
            "OMDb API",
            &e.to_string(),
            "Check your OMDb API key and network connection",
        ),
    }
}
