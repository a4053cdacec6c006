//! Routing engine client.
//!
//! Builds Valhalla `/route` requests from the trip, issues them and turns
//! the response into a decoded path. [`RouteService`] abstracts the
//! transport so orchestration can be tested without a server.

mod client;
mod convert;
mod error;
mod polyline;
mod request;
mod types;

use std::fmt;
use std::future::Future;

pub use client::{ValhallaClient, ValhallaConfig};
pub use convert::{RouteResponse, RouteSummary, convert_route_response};
pub use error::{NO_ROUTE_FOR_PROFILE, RouteError};
pub use polyline::{PolylineError, VALHALLA_PRECISION, decode_polyline};
pub use request::build_route_request;
pub use types::{DirectionsOptions, Location, RouteRequest};

/// Identifies a routing backend. Route results are keyed by provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a provider id.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The provider name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A routing backend.
pub trait RouteService: Send + Sync + 'static {
    /// The provider this service's results are stored under.
    fn provider_id(&self) -> ProviderId;

    /// Compute a route.
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<RouteResponse, RouteError>> + Send;
}
