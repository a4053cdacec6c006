//! Timing configuration for the orchestrators.

use std::time::Duration;

/// Configuration for geocode and route orchestration.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// Trailing window for forward-search debouncing.
    /// Only the last keystroke within the window issues a request.
    pub debounce: Duration,

    /// Delay between a route request completing and the loading flag
    /// being cleared. Avoids spinner flicker on fast responses.
    pub loading_grace: Duration,
}

impl DirectionsConfig {
    /// Create a new configuration with the given timings.
    pub fn new(debounce: Duration, loading_grace: Duration) -> Self {
        Self {
            debounce,
            loading_grace,
        }
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the loading grace delay.
    pub fn with_loading_grace(mut self, grace: Duration) -> Self {
        self.loading_grace = grace;
        self
    }
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            loading_grace: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DirectionsConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.loading_grace, Duration::from_millis(500));
    }

    #[test]
    fn custom_config() {
        let config = DirectionsConfig::default()
            .with_debounce(Duration::from_millis(450))
            .with_loading_grace(Duration::ZERO);

        assert_eq!(config.debounce, Duration::from_millis(450));
        assert_eq!(config.loading_grace, Duration::ZERO);

        let config = DirectionsConfig::new(Duration::from_millis(1), Duration::from_millis(2));
        assert_eq!(config.debounce, Duration::from_millis(1));
        assert_eq!(config.loading_grace, Duration::from_millis(2));
    }
}
