//! Shared trip state.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{CostingSettings, HighlightSegment, Profile};
use crate::permalink;
use crate::routing::ProviderId;

use super::route::RouteResults;
use super::store::WaypointStore;

/// Everything the directions core knows about the current trip.
#[derive(Debug, Clone, Default)]
pub struct TripState {
    pub waypoints: WaypointStore,
    pub routes: RouteResults,
    pub highlight: HighlightSegment,
    pub profile: Profile,
    pub settings: CostingSettings,
    /// Generation of the most recently issued route request.
    route_generation: u64,
}

impl TripState {
    /// A fresh trip with an empty, visible route for each provider.
    pub fn with_providers(providers: impl IntoIterator<Item = ProviderId>) -> Self {
        Self {
            routes: RouteResults::with_providers(providers),
            ..Self::default()
        }
    }

    /// Start a new route generation, superseding any in flight.
    pub fn next_route_generation(&mut self) -> u64 {
        self.route_generation += 1;
        self.route_generation
    }

    /// Returns true if `generation` is the most recently issued one.
    pub fn is_latest_route(&self, generation: u64) -> bool {
        self.route_generation == generation
    }

    /// The trip encoded as a permalink query string.
    pub fn permalink(&self) -> String {
        permalink::encode(self.profile, &self.waypoints.to_vec())
    }
}

/// Handle to the shared trip state.
///
/// Cloning the handle shares the state. The lock is never held across a
/// network call, so every update is a short critical section.
#[derive(Debug, Clone, Default)]
pub struct TripHandle {
    inner: Arc<RwLock<TripState>>,
}

impl TripHandle {
    /// Wrap an initial state.
    pub fn new(state: TripState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// An owned copy of the current state.
    pub async fn snapshot(&self) -> TripState {
        self.inner.read().await.clone()
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, TripState> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, TripState> {
        self.inner.write().await
    }
}
