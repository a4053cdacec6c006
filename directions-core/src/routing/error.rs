//! Routing client error types.

use super::polyline::PolylineError;

/// Engine error code for "no path could be found for this travel mode".
pub const NO_ROUTE_FOR_PROFILE: u32 = 154;

/// Errors from the routing engine client.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Engine rejected the request with a structured error
    #[error("{status}: {error}")]
    Engine {
        error: String,
        error_code: Option<u32>,
        status: String,
    },

    /// Engine returned an error status without a readable body
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response geometry could not be decoded
    #[error("invalid route geometry: {0}")]
    Geometry(#[from] PolylineError),

    /// Client configuration is unusable
    #[error("invalid routing configuration: {0}")]
    Config(String),
}

impl RouteError {
    /// Returns true if the engine found no path for the requested profile.
    pub fn is_no_route_for_profile(&self) -> bool {
        matches!(
            self,
            RouteError::Engine {
                error_code: Some(NO_ROUTE_FOR_PROFILE),
                ..
            }
        )
    }

    /// Returns true if the engine answered, as opposed to a transport failure.
    pub fn is_engine_rejection(&self) -> bool {
        matches!(self, RouteError::Engine { .. } | RouteError::Api { .. })
    }
}
