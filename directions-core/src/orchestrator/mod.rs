//! Orchestration of lookups and routing for a trip.
//!
//! [`Directions`] is the entry point. It wires a [`GeocodeOrchestrator`] and
//! a [`RouteOrchestrator`] to one shared trip and reports UI side effects as
//! [`Signal`]s.

mod config;
mod error;
mod geocode;
mod route;
mod session;
mod signals;


pub use config::DirectionsConfig;
pub use error::DirectionsError;
pub use geocode::{GeocodeOrchestrator, GeocodeOutcome, PermalinkOutcome};
pub use route::{RouteOrchestrator, RouteOutcome};
pub use session::Directions;
pub use signals::{
    Notification, NotificationKind, Signal, SignalReceiver, SignalSink, viewport,
};
