//! Directions core.
//!
//! The state and orchestration behind a map-based directions panel: an
//! ordered list of waypoints, debounced place search against a Pelias
//! geocoder, route requests against a Valhalla engine, and a shareable
//! permalink that can rebuild the trip.
//!
//! Rendering is left to the caller. [`orchestrator::Directions`] owns a trip
//! and reports what the UI should do through [`orchestrator::Signal`]s.

pub mod domain;
pub mod geocode;
pub mod orchestrator;
pub mod permalink;
pub mod routing;
pub mod trip;
