//! `CatalogApi` trait definition.

use crate::models::catalog::{DetailRecord, Query, SearchPage};
use crate::Result;

/// Catalog operations the page controller depends on.
///
/// Uses `trait_variant::make` to generate a `Send`-bound async trait so
/// fetches can run on spawned tasks.
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Whether an access credential is configured.
    fn has_credential(&self) -> bool;

    /// Searches titles matching `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is configured, or the request or
    /// JSON decoding fails.
    async fn search(&self, query: &Query) -> Result<SearchPage>;

    /// Fetches the full record for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if no credential is configured, the request fails,
    /// or the catalog reports the lookup as failed.
    async fn fetch_details(&self, id: &str) -> Result<DetailRecord>;
}
