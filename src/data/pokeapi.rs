//! PokeAPI client
//!
//! This module fetches location areas and Pokemon from PokeAPI. Every request
//! goes through the response cache first: a hit is decoded straight from the
//! cached body, a miss is fetched over HTTP and the body is cached on success.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::{LocationAreaDetails, LocationAreaPage, Pokemon};
use crate::cache::Cache;

/// Base URL for the PokeAPI v2 REST API
pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Errors that can occur when fetching PokeAPI data
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: StatusCode },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Client for fetching PokeAPI resources through the response cache
#[derive(Debug)]
pub struct PokeApiClient {
    client: Client,
    base_url: String,
    cache: Cache,
}

impl PokeApiClient {
    /// Create a new PokeApiClient against the public PokeAPI
    pub fn new(cache: Cache) -> Self {
        Self::with_client(Client::new(), cache)
    }

    /// Create a new PokeApiClient with a custom HTTP client
    pub fn with_client(client: Client, cache: Cache) -> Self {
        Self {
            client,
            base_url: POKEAPI_BASE_URL.to_string(),
            cache,
        }
    }

    /// Point the client at a different API root, e.g. a local mirror
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The response cache backing this client
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Release the cache, e.g. to shut its sweeper down on exit
    pub fn into_cache(self) -> Cache {
        self.cache
    }

    /// URL of one page of the location-area listing
    pub fn location_areas_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/location-area/?offset={}&limit={}",
            self.base_url, offset, limit
        )
    }

    /// URL of a single location area by name or id
    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}/", self.base_url, name)
    }

    /// URL of a single Pokemon by name or id
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}/", self.base_url, name)
    }

    /// Fetch one page of location areas
    ///
    /// # Arguments
    /// * `offset` - Index of the first location area on the page
    /// * `limit` - Maximum number of location areas on the page
    pub async fn fetch_location_areas(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<LocationAreaPage, ApiError> {
        self.fetch_json(&self.location_areas_url(offset, limit)).await
    }

    /// Fetch a location area with its Pokemon encounters
    pub async fn fetch_location_area(&self, name: &str) -> Result<LocationAreaDetails, ApiError> {
        self.fetch_json(&self.location_area_url(name)).await
    }

    /// Fetch a Pokemon with its stats and types
    pub async fn fetch_pokemon(&self, name: &str) -> Result<Pokemon, ApiError> {
        self.fetch_json(&self.pokemon_url(name)).await
    }

    /// Fetch the raw body for `url`, serving it from the cache when present
    ///
    /// Only successful responses are cached, so a 404 for a mistyped name is
    /// retried on the next request rather than remembered.
    ///
    /// # Returns
    /// * `Ok(Bytes)` - The response body, cached or freshly fetched
    /// * `Err(ApiError)` - If the request fails or the status is not 2xx
    pub async fn fetch_bytes(&self, url: &str) -> Result<Bytes, ApiError> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(body);
        }
        debug!(url, "Cache miss, fetching");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone());
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let body = self.fetch_bytes(url).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
