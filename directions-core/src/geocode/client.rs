//! Pelias HTTP client.
//!
//! Forward search uses the `autocomplete` endpoint, reverse lookups use
//! `reverse`. Both ask for at most five results.

use tracing::debug;

use crate::domain::{LatLng, MAX_CANDIDATES, Place};

use super::GeocodeService;
use super::convert::convert_feature_collection;
use super::error::GeocodeError;
use super::types::FeatureCollection;

/// Default base URL for a self-hosted Pelias instance.
const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Configuration for the Pelias client.
#[derive(Debug, Clone)]
pub struct PeliasConfig {
    /// Base URL of the Pelias API, without the `/v1` suffix
    pub base_url: String,
    /// Optional API key sent as `api_key` query parameter
    pub api_key: Option<String>,
    /// Maximum results requested per lookup
    pub size: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PeliasConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the number of results requested.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PeliasConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            size: MAX_CANDIDATES,
            timeout_secs: 30,
        }
    }
}

/// Client for a Pelias-compatible geocoder.
#[derive(Debug, Clone)]
pub struct PeliasClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    size: usize,
}

impl PeliasClient {
    /// Create a new Pelias client.
    pub fn new(config: PeliasConfig) -> Result<Self, GeocodeError> {
        if config.size == 0 {
            return Err(GeocodeError::Config("size must be at least 1".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            size: config.size,
        })
    }

    /// Issue a GET against a Pelias endpoint and convert the features.
    async fn fetch(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<Vec<Place>, GeocodeError> {
        let url = format!("{}/v1/{}", self.base_url, endpoint);

        params.push(("size", self.size.to_string()));
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_feature_collection(collection))
    }
}

impl GeocodeService for PeliasClient {
    async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodeError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        debug!(text, "pelias autocomplete");
        self.fetch("autocomplete", vec![("text", text.to_string())])
            .await
    }

    async fn reverse(&self, at: LatLng) -> Result<Vec<Place>, GeocodeError> {
        if at.is_unset() {
            return Ok(Vec::new());
        }

        debug!(lat = at.lat, lng = at.lng, "pelias reverse");
        self.fetch(
            "reverse",
            vec![
                ("point.lat", at.lat.to_string()),
                ("point.lon", at.lng.to_string()),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = PeliasConfig::new("http://pelias.test")
            .with_api_key("k")
            .with_size(3)
            .with_timeout(5);

        assert_eq!(config.base_url, "http://pelias.test");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.size, 3);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = PeliasConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.size, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation_trims_trailing_slash() {
        let client = PeliasClient::new(PeliasConfig::new("http://pelias.test/")).unwrap();
        assert_eq!(client.base_url, "http://pelias.test");
    }

    #[test]
    fn zero_size_is_rejected() {
        let result = PeliasClient::new(PeliasConfig::default().with_size(0));
        assert!(matches!(result, Err(GeocodeError::Config(_))));
    }

    // Blank input and the 0,0 placeholder return before any request is
    // built, so these run without a server.
    #[tokio::test]
    async fn blank_search_issues_no_request() {
        let client = PeliasClient::new(PeliasConfig::new("http://127.0.0.1:9")).unwrap();
        assert!(client.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unset_reverse_issues_no_request() {
        let client = PeliasClient::new(PeliasConfig::new("http://127.0.0.1:9")).unwrap();
        assert!(client.reverse(LatLng::new(0.0, 0.0)).await.unwrap().is_empty());
    }
}
