//! OMDb API client.

use crate::core::input::validate_year;
use crate::models::catalog::{
    available, DetailRecord, MediaKind, Query, Rating, SearchPage, SearchResultItem,
};
use crate::models::config::{OmdbSettings, DEFAULT_OMDB_BASE_URL};
use crate::services::catalog::CatalogApi;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Error text the service returns when a query matches too many titles.
const TOO_MANY_RESULTS: &str = "Too many results.";

/// Known title used to probe the API key.
const PROBE_ID: &str = "tt0111161";

/// OMDb client configuration.
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// API key, `None` disables all requests.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl OmdbConfig {
    /// Create config for the public endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_OMDB_BASE_URL.to_string(),
        }
    }

    /// Create config from file settings and an already-resolved key.
    pub fn from_settings(settings: &OmdbSettings, api_key: Option<String>) -> Self {
        Self::new(api_key).with_base_url(settings.base_url.clone())
    }

    /// Override the endpoint (for wiremock in tests).
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// OMDb API client.
pub struct OmdbClient {
    config: OmdbConfig,
    client: reqwest::Client,
}

/// Search response as sent by the service.
#[derive(Debug, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Search item as sent by the service.
#[derive(Debug, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

/// Detail response as sent by the service.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OmdbDetails {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub year: Option<String>,
    pub rated: Option<String>,
    pub released: Option<String>,
    pub runtime: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub writer: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub awards: Option<String>,
    pub poster: Option<String>,
    pub ratings: Option<Vec<OmdbRating>>,
    pub metascore: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    #[serde(rename = "DVD")]
    pub dvd: Option<String>,
    pub box_office: Option<String>,
    pub production: Option<String>,
    pub website: Option<String>,
    pub response: String,
    pub error: Option<String>,
}

/// Rating entry as sent by the service.
#[derive(Debug, Deserialize)]
pub struct OmdbRating {
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Whether a boolean-as-string `Response` flag reports success.
fn response_ok(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}

impl OmdbSearchResponse {
    /// Convert to a page. Any `Response: "False"` payload becomes an empty page.
    pub fn into_page(self) -> SearchPage {
        if !response_ok(&self.response) {
            match self.error.as_deref() {
                Some(TOO_MANY_RESULTS) => {
                    tracing::debug!("Query too broad, treating as empty result")
                }
                Some(error) => tracing::debug!("No results: {}", error),
                None => tracing::debug!("No results"),
            }
            return SearchPage::empty();
        }

        let total_count = self
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0);

        SearchPage {
            items: self
                .search
                .unwrap_or_default()
                .into_iter()
                .map(SearchResultItem::from)
                .collect(),
            total_count,
        }
    }
}

impl From<OmdbSearchItem> for SearchResultItem {
    fn from(item: OmdbSearchItem) -> Self {
        Self {
            id: item.imdb_id,
            kind: MediaKind::from_catalog(&item.kind),
            title: item.title,
            year: item.year,
            poster_url: available(item.poster),
        }
    }
}

impl OmdbDetails {
    /// Convert to a detail record, failing when the service reports an error.
    pub fn into_record(self, requested_id: &str) -> Result<DetailRecord> {
        if !response_ok(&self.response) {
            return Err(Error::LookupFailed(
                self.error
                    .unwrap_or_else(|| format!("no record for {}", requested_id)),
            ));
        }

        Ok(DetailRecord {
            id: available(self.imdb_id).unwrap_or_else(|| requested_id.to_string()),
            title: available(self.title).unwrap_or_default(),
            year: available(self.year),
            kind: available(self.kind).map(|k| MediaKind::from_catalog(&k)),
            poster_url: available(self.poster),
            rated: available(self.rated),
            released: available(self.released),
            runtime: available(self.runtime),
            genre: available(self.genre),
            director: available(self.director),
            writer: available(self.writer),
            actors: available(self.actors),
            plot: available(self.plot),
            language: available(self.language),
            country: available(self.country),
            awards: available(self.awards),
            ratings: self
                .ratings
                .unwrap_or_default()
                .into_iter()
                .filter_map(|r| {
                    available(Some(r.value)).map(|value| Rating {
                        source: r.source,
                        value,
                    })
                })
                .collect(),
            metascore: available(self.metascore),
            imdb_rating: available(self.imdb_rating),
            imdb_votes: available(self.imdb_votes),
            dvd: available(self.dvd),
            box_office: available(self.box_office),
            production: available(self.production),
            website: available(self.website),
            found: true,
        })
    }
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// The configured key, or `ApiKeyMissing` before any network call.
    fn api_key(&self) -> Result<&str> {
        self.config.api_key.as_deref().ok_or(Error::ApiKeyMissing)
    }

    /// Build URL with the api key and extra parameters.
    fn build_url(&self, api_key: &str, params: &str) -> String {
        format!(
            "{}/?apikey={}{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(api_key),
            params
        )
    }

    /// Query parameters for a search, without the key.
    fn search_params(query: &Query) -> Result<String> {
        let mut params = format!(
            "&s={}&page={}",
            urlencoding::encode(query.text.trim()),
            query.page.max(1)
        );
        if let Some(kind) = query.kind.and_then(|k| k.as_filter()) {
            params.push_str(&format!("&type={}", kind));
        }
        if let Some(ref year) = query.year {
            params.push_str(&format!("&y={}", validate_year(year)?));
        }
        Ok(params)
    }

    /// Query parameters for a detail lookup, without the key.
    fn details_params(id: &str) -> String {
        format!("&i={}&plot=full", urlencoding::encode(id.trim()))
    }

    /// Send a GET and decode the JSON body, mapping non-success statuses.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::TransportStatus(status.as_u16()));
        }
        Ok(resp.json().await?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = self.build_url(self.api_key()?, &Self::details_params(PROBE_ID));

        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

impl CatalogApi for OmdbClient {
    fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn search(&self, query: &Query) -> Result<SearchPage> {
        let api_key = self.api_key()?;
        let params = Self::search_params(query)?;
        tracing::debug!("OMDb search: {}", params);

        let resp: OmdbSearchResponse = self.get_json(&self.build_url(api_key, &params)).await?;
        Ok(resp.into_page())
    }

    async fn fetch_details(&self, id: &str) -> Result<DetailRecord> {
        let api_key = self.api_key()?;
        let params = Self::details_params(id);
        tracing::debug!("OMDb lookup: {}", params);

        let resp: OmdbDetails = self.get_json(&self.build_url(api_key, &params)).await?;
        resp.into_record(id)
    }
}
