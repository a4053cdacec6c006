//! Trip state: waypoints, routes and the shared handle.

mod error;
mod route;
mod state;
mod store;

pub use error::StoreError;
pub use route::{RouteResult, RouteResults};
pub use state::{TripHandle, TripState};
pub use store::{MIN_WAYPOINTS, Removal, RequestTicket, WaypointStore};
