//! Caching layer for forward searches.
//!
//! Typing the same text into two search fields, or backspacing over a
//! query, asks the same question again. Results are cached by the trimmed
//! query text for a short TTL. Reverse lookups are not cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{LatLng, Place};

use super::GeocodeService;
use super::error::GeocodeError;

/// Configuration for the search cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 500,
        }
    }
}

/// Geocoder with a forward-search cache.
///
/// Wraps any [`GeocodeService`]; failed lookups are never cached.
pub struct CachedGeocoder<G> {
    inner: G,
    searches: MokaCache<String, Arc<Vec<Place>>>,
}

impl<G: GeocodeService> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, searches }
    }

    /// Access the wrapped geocoder.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G: GeocodeService> GeocodeService for CachedGeocoder<G> {
    async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodeError> {
        let key = text.trim().to_string();
        if key.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(cached) = self.searches.get(&key).await {
            trace!(text = %key, "search cache hit");
            return Ok(cached.as_ref().clone());
        }

        let places = self.inner.search(&key).await?;
        self.searches
            .insert(key, Arc::new(places.clone()))
            .await;

        Ok(places)
    }

    async fn reverse(&self, at: LatLng) -> Result<Vec<Place>, GeocodeError> {
        self.inner.reverse(at).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use geo::Coord;

    use super::*;

    #[derive(Default)]
    struct CountingGeocoder {
        searches: Mutex<Vec<String>>,
        fail: bool,
    }

    impl GeocodeService for CountingGeocoder {
        async fn search(&self, text: &str) -> Result<Vec<Place>, GeocodeError> {
            self.searches.lock().unwrap().push(text.to_string());
            if self.fail {
                return Err(GeocodeError::Api {
                    status: 500,
                    message: "boom".into(),
                });
            }
            Ok(vec![Place {
                coordinate: Coord { x: 1.0, y: 2.0 },
                label: text.to_string(),
                bounds: None,
                raw: serde_json::Value::Null,
            }])
        }

        async fn reverse(&self, _at: LatLng) -> Result<Vec<Place>, GeocodeError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_capacity, 500);
    }

    #[tokio::test]
    async fn repeated_query_hits_cache() {
        let cached = CachedGeocoder::new(CountingGeocoder::default(), &CacheConfig::default());

        let first = cached.search("Paris").await.unwrap();
        let second = cached.search("  Paris ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().searches.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let inner = CountingGeocoder {
            fail: true,
            ..Default::default()
        };
        let cached = CachedGeocoder::new(inner, &CacheConfig::default());

        assert!(cached.search("Paris").await.is_err());
        assert!(cached.search("Paris").await.is_err());
        assert_eq!(cached.inner().searches.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn blank_query_skips_inner() {
        let cached = CachedGeocoder::new(CountingGeocoder::default(), &CacheConfig::default());
        assert!(cached.search("").await.unwrap().is_empty());
        assert!(cached.inner().searches.lock().unwrap().is_empty());
    }
}
