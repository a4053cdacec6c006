//! Orchestration error taxonomy.
//!
//! Nothing here is fatal. Every failure degrades to "no route / no result
//! shown" plus a transient notification, and nothing is retried.

use crate::geocode::GeocodeError;
use crate::trip::StoreError;

/// Errors reported by orchestrator operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectionsError {
    /// Geocoder answered with no places
    #[error("no addresses found")]
    NoResultsFound,

    /// Routing engine rejected the request
    #[error("route unavailable: {0}")]
    RouteUnavailable(String),

    /// Network or protocol failure talking to a service
    #[error("transport error: {0}")]
    Transport(String),

    /// Input that cannot be acted on
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Waypoint index out of range
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<GeocodeError> for DirectionsError {
    fn from(err: GeocodeError) -> Self {
        DirectionsError::Transport(err.to_string())
    }
}
