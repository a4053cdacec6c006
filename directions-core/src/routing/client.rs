//! Valhalla HTTP client.

use tracing::debug;

use super::convert::{RouteResponse, convert_route_response};
use super::error::RouteError;
use super::types::{ErrorPayload, RouteRequest};
use super::{ProviderId, RouteService};

/// Default base URL: the public OSM Valhalla instance.
const DEFAULT_BASE_URL: &str = "https://valhalla1.openstreetmap.de";

/// Provider name shown in notifications.
const DEFAULT_PROVIDER: &str = "OSM";

/// Configuration for the Valhalla client.
#[derive(Debug, Clone)]
pub struct ValhallaConfig {
    /// Base URL of the routing engine
    pub base_url: String,
    /// Name used to key route results and prefix error messages
    pub provider: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ValhallaConfig {
    /// Create a config pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the provider name.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ValhallaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            provider: DEFAULT_PROVIDER.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Client for a Valhalla routing engine.
#[derive(Debug, Clone)]
pub struct ValhallaClient {
    http: reqwest::Client,
    base_url: String,
    provider: ProviderId,
}

impl ValhallaClient {
    /// Create a new Valhalla client.
    pub fn new(config: ValhallaConfig) -> Result<Self, RouteError> {
        if config.provider.trim().is_empty() {
            return Err(RouteError::Config("provider name is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            provider: ProviderId::new(config.provider),
        })
    }
}

impl RouteService for ValhallaClient {
    fn provider_id(&self) -> ProviderId {
        self.provider.clone()
    }

    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RouteError> {
        let url = format!("{}/route", self.base_url);
        let json = serde_json::to_string(request).map_err(|e| RouteError::Json {
            message: e.to_string(),
            body: None,
        })?;

        debug!(
            costing = request.costing,
            locations = request.locations.len(),
            "valhalla route"
        );

        let response = self
            .http
            .get(&url)
            .query(&[("json", json)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorPayload>(&body) {
                Ok(payload) => RouteError::Engine {
                    error: payload.error,
                    error_code: payload.error_code,
                    status: payload
                        .status
                        .unwrap_or_else(|| status.as_u16().to_string()),
                },
                Err(_) => RouteError::Api {
                    status: status.as_u16(),
                    message: body,
                },
            });
        }

        let raw: serde_json::Value = serde_json::from_str(&body).map_err(|e| RouteError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        convert_route_response(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = ValhallaConfig::new("http://localhost:8002")
            .with_provider("Local")
            .with_timeout(10);

        assert_eq!(config.base_url, "http://localhost:8002");
        assert_eq!(config.provider, "Local");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_defaults() {
        let config = ValhallaConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.provider, "OSM");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let client = ValhallaClient::new(ValhallaConfig::default()).unwrap();
        assert_eq!(client.provider_id(), ProviderId::new("OSM"));
    }

    #[test]
    fn empty_provider_is_rejected() {
        let result = ValhallaClient::new(ValhallaConfig::default().with_provider(" "));
        assert!(matches!(result, Err(RouteError::Config(_))));
    }
}
