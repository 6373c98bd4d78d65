//! PokeAPI client implementation.
//!
//! Responses are cached as raw bytes under the full request URL, so distinct
//! pages and resources live side by side in the cache.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use pokedex_cache::ExpiringCache;
use pokedex_core::constants::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECONDS};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::traits::Catalog;
use pokedex_core::types::{LocationArea, LocationAreaPage, Pokemon};

/// PokeAPI client configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. "https://pokeapi.co/api/v2"
    pub base_url: String,
    /// Location areas per listing page
    pub page_size: u32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    /// Creates config for the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the listing page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            PokedexError::InvalidConfiguration(format!("base url '{}': {}", self.base_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(PokedexError::InvalidConfiguration(format!(
                "base url must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.page_size == 0 {
            return Err(PokedexError::InvalidConfiguration(
                "page size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Read-through client for the PokeAPI catalog.
pub struct PokeApiClient {
    config: ClientConfig,
    http_client: reqwest::Client,
    cache: Arc<ExpiringCache>,
}

impl PokeApiClient {
    /// Creates a client that reads through `cache`.
    pub fn new(config: ClientConfig, cache: Arc<ExpiringCache>) -> Result<Self> {
        config.validate()?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PokedexError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
            cache,
        })
    }

    /// Returns the response cache this client reads through.
    pub fn cache(&self) -> &Arc<ExpiringCache> {
        &self.cache
    }

    /// URL of the first page of location areas.
    pub fn first_page_url(&self) -> String {
        format!(
            "{}?limit={}&offset=0",
            self.endpoint("location-area/"),
            self.config.page_size
        )
    }

    /// Fetches one page of location areas by full URL.
    #[instrument(skip(self))]
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        if url.trim().is_empty() {
            return Err(PokedexError::ValidationError("page url cannot be empty".into()));
        }
        self.fetch_json(url).await
    }

    /// Returns the names of the creatures encountered in `area`.
    #[instrument(skip(self))]
    pub async fn explore_area(&self, area: &str) -> Result<Vec<String>> {
        validate_name("area", area)?;
        let url = self.endpoint(&format!("location-area/{}", area));
        let area: LocationArea = self.fetch_json(&url).await?;
        Ok(area.pokemon_names())
    }

    /// Fetches the details of the creature called `name`.
    #[instrument(skip(self))]
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        validate_name("pokemon", name)?;
        let url = self.endpoint(&format!("pokemon/{}", name));
        self.fetch_json(&url).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Serves `url` from the cache, fetching and caching it on a miss.
    ///
    /// Only bodies that decode are cached.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(serde_json::from_slice(&body)?);
        }

        debug!(url, "Cache miss, fetching");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                PokedexError::ConnectionTimeout(url.to_string())
            } else {
                PokedexError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(PokedexError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PokedexError::HttpError(e.to_string()))?;
        let value = serde_json::from_slice(&body)?;

        self.cache.insert(url, body);
        debug!(url, "Cached response");
        Ok(value)
    }
}

/// Rejects names that would escape their URL path segment.
fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PokedexError::ValidationError(format!("{} name cannot be empty", what)));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.') {
        return Err(PokedexError::ValidationError(format!(
            "{} name '{}' contains invalid characters",
            what, name
        )));
    }
    Ok(())
}

#[async_trait]
impl Catalog for PokeApiClient {
    fn first_page_url(&self) -> String {
        PokeApiClient::first_page_url(self)
    }

    async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        PokeApiClient::location_areas(self, url).await
    }

    async fn explore_area(&self, area: &str) -> Result<Vec<String>> {
        PokeApiClient::explore_area(self, area).await
    }

    async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        PokeApiClient::pokemon(self, name).await
    }
}
