//! Route orchestration.
//!
//! Every trip mutation that can change the route ends up here. Requests are
//! stamped with a route generation and only the most recently issued one may
//! write its result, whatever order the responses arrive in.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::domain::LatLng;
use crate::routing::{
    ProviderId, RouteError, RouteResponse, RouteService, build_route_request,
};
use crate::trip::TripHandle;

use super::error::DirectionsError;
use super::signals::{Notification, Signal, SignalSink, viewport};

/// What a route request did to the trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Fewer than two active waypoints. The route was cleared.
    NotEnoughWaypoints,
    /// A new route was stored.
    Routed,
    /// A newer request was issued while this one was in flight.
    Superseded,
}

/// Issues route requests for a trip and applies their results.
pub struct RouteOrchestrator<R> {
    trip: TripHandle,
    router: R,
    provider: ProviderId,
    signals: SignalSink,
    loading_grace: Duration,
    /// Route generation that most recently switched the loading flag on.
    loading: Arc<AtomicU64>,
}

impl<R: RouteService> RouteOrchestrator<R> {
    /// Create an orchestrator for `trip`.
    pub fn new(trip: TripHandle, router: R, signals: SignalSink, loading_grace: Duration) -> Self {
        let provider = router.provider_id();
        Self {
            trip,
            router,
            provider,
            signals,
            loading_grace,
            loading: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Re-evaluate the route for the current trip.
    ///
    /// Always publishes the trip's permalink first. With fewer than two
    /// active waypoints no request is made and any displayed route is
    /// cleared. Engine rejections and transport failures clear the route and
    /// send one notification.
    pub async fn request_route(&self) -> Result<RouteOutcome, DirectionsError> {
        let (generation, request) = {
            let mut trip = self.trip.write().await;
            self.signals.emit(Signal::PermalinkChanged(trip.permalink()));

            let generation = trip.next_route_generation();
            let active = trip.waypoints.active_count();
            if active < 2 {
                debug!(active, "not enough waypoints to route");
                trip.routes.clear(&self.provider);
                return Ok(RouteOutcome::NotEnoughWaypoints);
            }

            let request =
                build_route_request(trip.profile, &trip.waypoints.to_vec(), &trip.settings);
            self.loading.store(generation, Ordering::SeqCst);
            (generation, request)
        };

        debug!(
            provider = %self.provider,
            generation,
            costing = request.costing,
            locations = request.locations.len(),
            "requesting route"
        );
        self.signals.emit(Signal::Loading(true));

        let result = self
            .router
            .route(&request)
            .await
            .and_then(|response| {
                let path = response.decode_geometry()?;
                Ok((response, path))
            });

        let outcome = self.apply(generation, request.costing, result).await;
        self.schedule_loading_off(generation);
        outcome
    }

    /// Drop the displayed route and supersede anything in flight.
    pub async fn clear_route(&self) {
        let mut trip = self.trip.write().await;
        trip.next_route_generation();
        trip.routes.clear(&self.provider);
    }

    /// Show or hide this provider's route.
    pub async fn set_route_visible(&self, visible: bool) {
        self.trip
            .write()
            .await
            .routes
            .set_visible(&self.provider, visible);
    }

    async fn apply(
        &self,
        generation: u64,
        costing: &str,
        result: Result<(RouteResponse, Vec<LatLng>), RouteError>,
    ) -> Result<RouteOutcome, DirectionsError> {
        let mut trip = self.trip.write().await;
        if !trip.is_latest_route(generation) {
            trace!(generation, "discarding superseded route response");
            return Ok(RouteOutcome::Superseded);
        }

        match result {
            Ok((response, path)) => {
                let bounds = viewport(&path);
                debug!(
                    provider = %self.provider,
                    points = path.len(),
                    "route stored"
                );
                trip.routes.store(&self.provider, response, path);
                drop(trip);

                if let Some(bounds) = bounds {
                    self.signals.emit(Signal::FitViewport(bounds));
                }
                Ok(RouteOutcome::Routed)
            }
            Err(e) => {
                trip.routes.clear(&self.provider);
                drop(trip);

                if e.is_engine_rejection() {
                    debug!(provider = %self.provider, error = %e, "engine rejected route");
                } else {
                    warn!(provider = %self.provider, error = %e, "route request failed");
                }
                let (notification, err) = failure(&self.provider, costing, &e);
                self.signals.notify(notification);
                Err(err)
            }
        }
    }

    fn schedule_loading_off(&self, generation: u64) {
        let loading = self.loading.clone();
        let signals = self.signals.clone();
        let grace = self.loading_grace;

        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if loading.load(Ordering::SeqCst) == generation {
                signals.emit(Signal::Loading(false));
            }
        });
    }
}

/// The notification and error for a failed route request.
fn failure(
    provider: &ProviderId,
    costing: &str,
    err: &RouteError,
) -> (Notification, DirectionsError) {
    match err {
        RouteError::Engine { error, status, .. } => {
            let mut description = format!("{provider}: {error}");
            if err.is_no_route_for_profile() {
                description.push_str(&format!(" for {costing}."));
            }
            (
                Notification::warning(status.clone(), description.clone()),
                DirectionsError::RouteUnavailable(description),
            )
        }
        RouteError::Api { status, message } => {
            let description = format!("{provider}: {message}");
            (
                Notification::warning(format!("Error {status}"), description.clone()),
                DirectionsError::RouteUnavailable(description),
            )
        }
        other => (
            Notification::error("Routing failed", format!("{provider}: {other}")),
            DirectionsError::Transport(other.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ProviderId {
        ProviderId::new("OSM")
    }

    #[test]
    fn no_route_for_profile_names_the_costing() {
        let err = RouteError::Engine {
            error: "No path could be found for input".into(),
            error_code: Some(154),
            status: "Bad Request".into(),
        };

        let (notification, directions_err) = failure(&provider(), "bicycle", &err);
        assert_eq!(notification.title, "Bad Request");
        assert_eq!(
            notification.description,
            "OSM: No path could be found for input for bicycle."
        );
        assert_eq!(
            directions_err,
            DirectionsError::RouteUnavailable(
                "OSM: No path could be found for input for bicycle.".into()
            )
        );
    }

    #[test]
    fn other_engine_errors_keep_the_engine_message() {
        let err = RouteError::Engine {
            error: "Exceeded max locations".into(),
            error_code: Some(150),
            status: "Bad Request".into(),
        };

        let (notification, _) = failure(&provider(), "auto", &err);
        assert_eq!(notification.description, "OSM: Exceeded max locations");
    }

    #[test]
    fn transport_failures_are_generic() {
        let err = RouteError::Json {
            message: "expected value".into(),
            body: None,
        };

        let (notification, directions_err) = failure(&provider(), "auto", &err);
        assert_eq!(notification.title, "Routing failed");
        assert_eq!(
            notification.description,
            "OSM: JSON parse error: expected value"
        );
        assert!(matches!(directions_err, DirectionsError::Transport(_)));
    }
}
