//! Geocode orchestration.
//!
//! Forward searches are debounced per waypoint and reverse lookups are
//! immediate. Each lookup holds a [`RequestTicket`]; a response only lands
//! if its ticket is still current when it arrives.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::domain::{LatLng, Place, Waypoint};
use crate::geocode::GeocodeService;
use crate::permalink::Permalink;
use crate::routing::RouteService;
use crate::trip::{RequestTicket, TripHandle};

use super::error::DirectionsError;
use super::route::{RouteOrchestrator, RouteOutcome};
use super::signals::{Notification, SignalSink};

/// What a lookup did to its waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeOutcome {
    /// Blank input. No request was made.
    Skipped,
    /// A newer lookup or edit replaced this one.
    Superseded,
    /// Forward search results were stored as candidates.
    Candidates(usize),
    /// The waypoint was resolved to the top result.
    Resolved,
}

/// Result of restoring a trip from a permalink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermalinkOutcome {
    /// Coordinate pairs in the permalink.
    pub total: usize,
    /// Pairs whose reverse lookup resolved a waypoint.
    pub resolved: usize,
    /// The route request made once every lookup finished.
    pub route: Option<RouteOutcome>,
}

/// Drives place lookups for a trip's waypoints.
pub struct GeocodeOrchestrator<G, R> {
    trip: TripHandle,
    geocoder: G,
    router: Arc<RouteOrchestrator<R>>,
    signals: SignalSink,
    debounce: Duration,
}

impl<G: GeocodeService, R: RouteService> GeocodeOrchestrator<G, R> {
    /// Create an orchestrator for `trip`.
    pub fn new(
        trip: TripHandle,
        geocoder: G,
        router: Arc<RouteOrchestrator<R>>,
        signals: SignalSink,
        debounce: Duration,
    ) -> Self {
        Self {
            trip,
            geocoder,
            router,
            signals,
            debounce,
        }
    }

    /// Record typed text for a waypoint and schedule a debounced search.
    ///
    /// The text is mirrored immediately. The request itself is made only if
    /// nothing else touches the waypoint for the debounce window. Text that
    /// reads as `lat,lng` is resolved by reverse lookup instead. The
    /// returned task finishes once the lookup is applied or discarded.
    pub async fn search_geocode(
        self: &Arc<Self>,
        index: usize,
        text: impl Into<String>,
    ) -> Result<JoinHandle<Result<GeocodeOutcome, DirectionsError>>, DirectionsError> {
        let text = text.into();
        let ticket = {
            let mut trip = self.trip.write().await;
            trip.waypoints.set_input_value(index, text.as_str())?;
            trip.waypoints.issue_ticket(index)?
        };

        let this = Arc::clone(self);
        Ok(tokio::spawn(async move {
            if text.trim().is_empty() {
                return Ok(GeocodeOutcome::Skipped);
            }
            let reverse_at = LatLng::parse_pair(&text);
            if reverse_at.is_some_and(|at| at.is_unset()) {
                debug!(index, "ignoring unset coordinate");
                return Ok(GeocodeOutcome::Skipped);
            }

            tokio::time::sleep(this.debounce).await;
            if !this.trip.write().await.waypoints.begin_fetch(&ticket) {
                trace!(index, "search superseded during debounce");
                return Ok(GeocodeOutcome::Superseded);
            }

            match reverse_at {
                Some(at) => {
                    let outcome = this.lookup_reverse(ticket, at).await?;
                    this.route_after(outcome).await;
                    Ok(outcome)
                }
                None => this.lookup_forward(ticket, &text).await,
            }
        }))
    }

    /// Resolve a waypoint from a picked candidate and re-route.
    ///
    /// Supersedes any lookup in flight for the waypoint. The waypoint keeps
    /// its current candidates as alternates.
    pub async fn select_candidate(
        &self,
        index: usize,
        candidate: &Place,
    ) -> Result<RouteOutcome, DirectionsError> {
        {
            let mut trip = self.trip.write().await;
            let alternates = trip
                .waypoints
                .get(index)
                .map(|wp| wp.candidate_results.clone())
                .unwrap_or_default();
            trip.waypoints
                .update_waypoint(index, Waypoint::from_place(index, candidate, alternates))?;
        }
        self.router.request_route().await
    }

    /// Resolve a waypoint from a map position and re-route.
    ///
    /// The `(0, 0)` sentinel is rejected without a request. When the
    /// geocoder finds nothing the user is told and the waypoint is left
    /// unresolved.
    pub async fn reverse_geocode(
        &self,
        index: usize,
        at: LatLng,
    ) -> Result<GeocodeOutcome, DirectionsError> {
        if at.is_unset() {
            return Err(DirectionsError::InvalidInput(
                "cannot look up the unset coordinate".into(),
            ));
        }

        let ticket = {
            let mut trip = self.trip.write().await;
            let ticket = trip.waypoints.issue_ticket(index)?;
            trip.waypoints.begin_fetch(&ticket);
            ticket
        };

        let outcome = self.lookup_reverse(ticket, at).await?;
        self.route_after(outcome).await;
        Ok(outcome)
    }

    /// Rebuild the trip from a decoded permalink.
    ///
    /// The trip is grown to one waypoint per pair before any lookup starts.
    /// Lookups run concurrently and the route is requested once, after all
    /// of them have completed. Pairs at the unset `0,0` are dropped.
    pub async fn init_from_permalink(
        &self,
        link: &Permalink,
    ) -> Result<PermalinkOutcome, DirectionsError> {
        let tickets = {
            let mut trip = self.trip.write().await;
            if let Some(profile) = link.profile {
                trip.profile = profile;
            }
            let pairs: Vec<LatLng> = link
                .pairs
                .iter()
                .map(|pair| LatLng::from(*pair))
                .filter(|at| {
                    if at.is_unset() {
                        debug!("dropping unset permalink coordinate");
                    }
                    !at.is_unset()
                })
                .collect();
            if pairs.is_empty() {
                return Ok(PermalinkOutcome {
                    total: 0,
                    resolved: 0,
                    route: None,
                });
            }

            trip.waypoints.remove_waypoint(None)?;
            while trip.waypoints.len() < pairs.len() {
                trip.waypoints.insert_waypoint();
            }

            let mut tickets = Vec::with_capacity(pairs.len());
            for (index, at) in pairs.into_iter().enumerate() {
                let ticket = trip.waypoints.issue_ticket(index)?;
                trip.waypoints.begin_fetch(&ticket);
                tickets.push((ticket, at));
            }
            tickets
        };

        let total = tickets.len();
        let mut lookups: FuturesUnordered<_> = tickets
            .into_iter()
            .map(|(ticket, at)| self.lookup_reverse(ticket, at))
            .collect();

        let mut completed = 0;
        let mut resolved = 0;
        while let Some(result) = lookups.next().await {
            completed += 1;
            match result {
                Ok(GeocodeOutcome::Resolved) => resolved += 1,
                Ok(_) => {}
                Err(e) => debug!(error = %e, "permalink waypoint lookup failed"),
            }
        }
        debug!(completed, total, resolved, "permalink lookups complete");

        let route = match self.router.request_route().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                debug!(error = %e, "permalink route failed");
                None
            }
        };

        Ok(PermalinkOutcome {
            total,
            resolved,
            route,
        })
    }

    async fn lookup_forward(
        &self,
        ticket: RequestTicket,
        text: &str,
    ) -> Result<GeocodeOutcome, DirectionsError> {
        debug!(index = ticket.index(), text, "forward geocode");
        let result = self.geocoder.search(text).await;

        let mut trip = self.trip.write().await;
        match result {
            Ok(places) => {
                let count = places.len();
                if !trip.waypoints.complete_fetch(&ticket, places) {
                    trace!(index = ticket.index(), "discarding stale search results");
                    return Ok(GeocodeOutcome::Superseded);
                }
                drop(trip);

                if count == 0 {
                    self.signals.notify(Notification::no_addresses());
                    return Err(DirectionsError::NoResultsFound);
                }
                Ok(GeocodeOutcome::Candidates(count))
            }
            Err(e) => {
                if !trip.waypoints.fail_fetch(&ticket) {
                    return Ok(GeocodeOutcome::Superseded);
                }
                drop(trip);
                Err(self.lookup_failed(e.into()))
            }
        }
    }

    /// Reverse lookup for a ticket already marked as fetching. Does not route.
    async fn lookup_reverse(
        &self,
        ticket: RequestTicket,
        at: LatLng,
    ) -> Result<GeocodeOutcome, DirectionsError> {
        debug!(index = ticket.index(), %at, "reverse geocode");
        let result = self.geocoder.reverse(at).await;

        let mut trip = self.trip.write().await;
        match result {
            Ok(places) => {
                let Some(top) = places.first() else {
                    if !trip.waypoints.complete_fetch(&ticket, Vec::new()) {
                        return Ok(GeocodeOutcome::Superseded);
                    }
                    drop(trip);
                    self.signals.notify(Notification::no_addresses());
                    return Err(DirectionsError::NoResultsFound);
                };

                if trip.waypoints.resolve(&ticket, top, places.clone()) {
                    Ok(GeocodeOutcome::Resolved)
                } else {
                    trace!(index = ticket.index(), "discarding stale reverse result");
                    Ok(GeocodeOutcome::Superseded)
                }
            }
            Err(e) => {
                if !trip.waypoints.fail_fetch(&ticket) {
                    return Ok(GeocodeOutcome::Superseded);
                }
                drop(trip);
                Err(self.lookup_failed(e.into()))
            }
        }
    }

    fn lookup_failed(&self, err: DirectionsError) -> DirectionsError {
        debug!(error = %err, "geocode lookup failed");
        self.signals
            .notify(Notification::error("Search failed", err.to_string()));
        err
    }

    /// Re-route after a lookup resolved a waypoint. Failures were already
    /// reported by the route orchestrator.
    async fn route_after(&self, outcome: GeocodeOutcome) {
        if outcome != GeocodeOutcome::Resolved {
            return;
        }
        if let Err(e) = self.router.request_route().await {
            debug!(error = %e, "route after lookup failed");
        }
    }
}
