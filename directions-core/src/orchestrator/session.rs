//! The directions session: one trip plus the services that resolve it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;
use url::Url;

use crate::domain::{CostingSettings, HighlightSegment, LatLng, Place, Profile, Waypoint};
use crate::geocode::GeocodeService;
use crate::permalink::{self, Permalink};
use crate::routing::RouteService;
use crate::trip::{Removal, TripHandle, TripState};

use super::config::DirectionsConfig;
use super::error::DirectionsError;
use super::geocode::{GeocodeOrchestrator, GeocodeOutcome, PermalinkOutcome};
use super::route::{RouteOrchestrator, RouteOutcome};
use super::signals::{Signal, SignalReceiver, SignalSink};

/// A directions session.
///
/// Owns the trip and exposes every operation the UI can perform on it.
/// Side effects the UI must render arrive on the [`SignalReceiver`]
/// returned by [`Directions::new`].
pub struct Directions<G, R> {
    trip: TripHandle,
    geocode: Arc<GeocodeOrchestrator<G, R>>,
    route: Arc<RouteOrchestrator<R>>,
    signals: SignalSink,
}

impl<G: GeocodeService, R: RouteService> Directions<G, R> {
    /// Start a session with an empty two-waypoint trip.
    pub fn new(geocoder: G, router: R, config: DirectionsConfig) -> (Self, SignalReceiver) {
        let (signals, rx) = SignalSink::channel();
        let trip = TripHandle::new(TripState::with_providers([router.provider_id()]));

        let route = Arc::new(RouteOrchestrator::new(
            trip.clone(),
            router,
            signals.clone(),
            config.loading_grace,
        ));
        let geocode = Arc::new(GeocodeOrchestrator::new(
            trip.clone(),
            geocoder,
            route.clone(),
            signals.clone(),
            config.debounce,
        ));

        let session = Self {
            trip,
            geocode,
            route,
            signals,
        };
        (session, rx)
    }

    /// An owned copy of the trip.
    pub async fn snapshot(&self) -> TripState {
        self.trip.snapshot().await
    }

    /// The trip's current permalink query string.
    pub async fn permalink(&self) -> String {
        self.trip.read().await.permalink()
    }

    /// Record search text for a waypoint. See
    /// [`GeocodeOrchestrator::search_geocode`].
    pub async fn search(
        &self,
        index: usize,
        text: impl Into<String>,
    ) -> Result<JoinHandle<Result<GeocodeOutcome, DirectionsError>>, DirectionsError> {
        self.geocode.search_geocode(index, text).await
    }

    /// Resolve a waypoint from a search candidate.
    pub async fn select_candidate(
        &self,
        index: usize,
        candidate: &Place,
    ) -> Result<RouteOutcome, DirectionsError> {
        self.geocode.select_candidate(index, candidate).await
    }

    /// Resolve a waypoint from a map position.
    pub async fn reverse_geocode(
        &self,
        index: usize,
        at: LatLng,
    ) -> Result<GeocodeOutcome, DirectionsError> {
        self.geocode.reverse_geocode(index, at).await
    }

    /// Append an empty waypoint. Returns its index.
    pub async fn add_waypoint(&self) -> usize {
        self.trip.write().await.waypoints.add_waypoint()
    }

    /// Insert an empty waypoint before the destination. Returns its index.
    pub async fn insert_waypoint(&self) -> usize {
        self.trip.write().await.waypoints.insert_waypoint()
    }

    /// Remove a waypoint, or clear the trip with `None`, then re-route.
    pub async fn remove_waypoint(&self, index: Option<usize>) -> Result<Removal, DirectionsError> {
        let removal = self.trip.write().await.waypoints.remove_waypoint(index)?;
        debug!(?index, ?removal, "waypoint removed");
        self.reroute().await;
        Ok(removal)
    }

    /// Replace a waypoint wholesale, then re-route.
    pub async fn update_waypoint(&self, index: usize, data: Waypoint) -> Result<(), DirectionsError> {
        self.trip
            .write()
            .await
            .waypoints
            .update_waypoint(index, data)?;
        self.reroute().await;
        Ok(())
    }

    /// Re-evaluate the route for the current trip.
    pub async fn request_route(&self) -> Result<RouteOutcome, DirectionsError> {
        self.route.request_route().await
    }

    /// Drop the displayed route.
    pub async fn clear_route(&self) {
        self.route.clear_route().await;
    }

    /// Show or hide the route.
    pub async fn set_route_visible(&self, visible: bool) {
        self.route.set_route_visible(visible).await;
    }

    /// Highlight a route segment, or clear the highlight if it is already
    /// the highlighted one.
    pub async fn highlight_segment(&self, requested: HighlightSegment) -> HighlightSegment {
        let highlight = {
            let mut trip = self.trip.write().await;
            trip.highlight = trip.highlight.toggled(requested);
            trip.highlight
        };
        self.signals.emit(Signal::HighlightChanged(highlight));
        highlight
    }

    /// Change the travel profile and re-route.
    pub async fn set_profile(&self, profile: Profile) -> Result<RouteOutcome, DirectionsError> {
        self.trip.write().await.profile = profile;
        self.route.request_route().await
    }

    /// Replace the costing settings and re-route.
    pub async fn set_settings(
        &self,
        settings: CostingSettings,
    ) -> Result<RouteOutcome, DirectionsError> {
        self.trip.write().await.settings = settings;
        self.route.request_route().await
    }

    /// Restore a trip from a permalink query string.
    pub async fn load_permalink(&self, query: &str) -> Result<PermalinkOutcome, DirectionsError> {
        self.apply_permalink(&permalink::decode(query)).await
    }

    /// Restore a trip from a URL's query.
    pub async fn load_url(&self, url: &Url) -> Result<PermalinkOutcome, DirectionsError> {
        self.apply_permalink(&permalink::decode_url(url)).await
    }

    async fn apply_permalink(&self, link: &Permalink) -> Result<PermalinkOutcome, DirectionsError> {
        debug!(
            profile = ?link.profile,
            waypoints = link.pairs.len(),
            "restoring trip from permalink"
        );
        self.geocode.init_from_permalink(link).await
    }

    async fn reroute(&self) {
        if let Err(e) = self.route.request_route().await {
            debug!(error = %e, "re-route failed");
        }
    }
}
