//! Trip waypoints.

use geo::Coord;

use super::coordinate::{UNSET, is_set};
use super::place::Place;

/// Maximum number of alternative matches kept on a waypoint.
pub const MAX_CANDIDATES: usize = 5;

/// One stop on the trip: origin, destination or a via point.
///
/// Waypoints have no identity beyond their position in the trip; `index`
/// is rewritten by the store whenever the sequence changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub index: usize,
    /// Resolved location, or `0,0` while unset.
    pub coordinate: Coord<f64>,
    pub label: String,
    /// Text currently in the search field. May lag `label` while typing.
    pub input_value: String,
    /// The selected geocode feature.
    pub raw_feature: Option<serde_json::Value>,
    /// Alternative matches for this slot, at most [`MAX_CANDIDATES`].
    pub candidate_results: Vec<Place>,
    pub is_fetching: bool,
}

impl Waypoint {
    /// An unresolved waypoint at the given position.
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            coordinate: UNSET,
            label: String::new(),
            input_value: String::new(),
            raw_feature: None,
            candidate_results: Vec::new(),
            is_fetching: false,
        }
    }

    /// A waypoint resolved to `place`, keeping `alternates` as candidates.
    pub fn from_place(index: usize, place: &Place, mut alternates: Vec<Place>) -> Self {
        alternates.truncate(MAX_CANDIDATES);
        Self {
            index,
            coordinate: place.coordinate,
            label: place.label.clone(),
            input_value: place.label.clone(),
            raw_feature: Some(place.raw.clone()),
            candidate_results: alternates,
            is_fetching: false,
        }
    }

    /// Whether this waypoint has a resolved coordinate and counts for routing.
    pub fn is_active(&self) -> bool {
        is_set(&self.coordinate)
    }

    /// Clear everything except the position.
    pub fn reset(&mut self) {
        *self = Self::empty(self.index);
    }
}
