//! Coordinate types.
//!
//! Waypoints store their position as a [`geo::Coord`] with `x = longitude`
//! and `y = latitude`. Map clicks, reverse lookups and decoded route paths
//! use the more explicit [`LatLng`] pair.

use std::fmt;

use geo::Coord;

/// The coordinate of a waypoint that has not been resolved yet.
pub const UNSET: Coord<f64> = Coord { x: 0.0, y: 0.0 };

/// Returns true if the coordinate has been resolved (is not `0,0`).
pub fn is_set(coord: &Coord<f64>) -> bool {
    coord.x != 0.0 || coord.y != 0.0
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a new pair.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true for the `0,0` placeholder, which is never looked up.
    pub fn is_unset(&self) -> bool {
        self.lat == 0.0 && self.lng == 0.0
    }

    /// Parse text typed into a search field as `lat,lng`.
    ///
    /// Whitespace around either number is allowed. Values outside the valid
    /// latitude/longitude ranges are rejected.
    ///
    /// ```
    /// use directions_core::domain::LatLng;
    ///
    /// assert_eq!(LatLng::parse_pair("50.1, 8.6"), Some(LatLng::new(50.1, 8.6)));
    /// assert_eq!(LatLng::parse_pair("Frankfurt"), None);
    /// assert_eq!(LatLng::parse_pair("95,8"), None);
    /// ```
    pub fn parse_pair(text: &str) -> Option<Self> {
        let (lat, lng) = text.trim().split_once(',')?;
        let lat: f64 = lat.trim().parse().ok()?;
        let lng: f64 = lng.trim().parse().ok()?;

        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if lat.abs() > 90.0 || lng.abs() > 180.0 {
            return None;
        }

        Some(Self { lat, lng })
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for LatLng {
    fn from(value: Coord<f64>) -> Self {
        Self {
            lat: value.y,
            lng: value.x,
        }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
