//! Permalink encoding.
//!
//! A trip is shared as two query parameters:
//!
//! - `profile`: the travel profile name (`car`, `bicycle`, ...)
//! - `wps`: active waypoint coordinates as one comma-separated list,
//!   longitude first: `lng1,lat1,lng2,lat2,...`
//!
//! Permalinks may be edited by hand, so decoding never fails: anything
//! malformed is dropped.

use geo::Coord;
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::domain::{Profile, Waypoint};

/// Query parameter holding the profile name.
pub const PROFILE_PARAM: &str = "profile";

/// Query parameter holding the waypoint list.
pub const WAYPOINTS_PARAM: &str = "wps";

/// Coordinates are written with six decimal places (about 0.1 m).
const COORDINATE_SCALE: f64 = 1e6;

/// Trip state recovered from a permalink.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Permalink {
    /// Profile, if present and recognised.
    pub profile: Option<Profile>,
    /// Waypoint coordinates in trip order, `x = longitude`, `y = latitude`.
    pub pairs: Vec<Coord<f64>>,
}

/// Encode the profile and the active waypoints as a query string.
///
/// ```
/// use directions_core::domain::{Profile, Waypoint};
/// use directions_core::permalink::encode;
///
/// let mut a = Waypoint::empty(0);
/// a.coordinate = geo::Coord { x: 10.0, y: 50.0 };
/// let mut b = Waypoint::empty(1);
/// b.coordinate = geo::Coord { x: 11.5, y: 51.25 };
///
/// assert_eq!(encode(Profile::Bicycle, &[a, b]), "profile=bicycle&wps=10,50,11.5,51.25");
/// ```
pub fn encode(profile: Profile, waypoints: &[Waypoint]) -> String {
    let wps: Vec<String> = waypoints
        .iter()
        .filter(|wp| wp.is_active())
        .flat_map(|wp| [wp.coordinate.x, wp.coordinate.y])
        .map(format_coordinate)
        .collect();

    // Profile names and numbers need no percent-encoding.
    if wps.is_empty() {
        format!("{PROFILE_PARAM}={profile}")
    } else {
        format!("{PROFILE_PARAM}={profile}&{WAYPOINTS_PARAM}={}", wps.join(","))
    }
}

/// Replace the query of `url` with the encoded trip.
pub fn apply_to_url(url: &mut Url, profile: Profile, waypoints: &[Waypoint]) {
    url.set_query(Some(&encode(profile, waypoints)));
}

/// Decode a query string, with or without the leading `?`.
///
/// ```
/// use directions_core::permalink::decode;
///
/// let link = decode("wps=10.0,50.0,11.0,51.0");
/// assert_eq!(link.pairs.len(), 2);
/// assert_eq!((link.pairs[1].x, link.pairs[1].y), (11.0, 51.0));
/// assert_eq!(link.profile, None);
/// ```
pub fn decode(query: &str) -> Permalink {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut permalink = Permalink::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            PROFILE_PARAM => {
                permalink.profile = match Profile::parse(&value) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        debug!(error = %e, "ignoring permalink profile");
                        None
                    }
                };
            }
            WAYPOINTS_PARAM => permalink.pairs = parse_waypoints(&value),
            _ => {}
        }
    }

    permalink
}

/// Decode the query of a full URL.
pub fn decode_url(url: &Url) -> Permalink {
    decode(url.query().unwrap_or_default())
}

fn format_coordinate(value: f64) -> String {
    let rounded = (value * COORDINATE_SCALE).round() / COORDINATE_SCALE;
    format!("{rounded}")
}

/// Parse `lng,lat,lng,lat,...`. Any bad value or an odd count yields nothing.
fn parse_waypoints(value: &str) -> Vec<Coord<f64>> {
    let numbers: Result<Vec<f64>, _> = value.split(',').map(|n| n.trim().parse::<f64>()).collect();

    let numbers = match numbers {
        Ok(numbers) if numbers.len() % 2 == 0 => numbers,
        Ok(numbers) => {
            debug!(count = numbers.len(), "permalink has an unterminated pair");
            return Vec::new();
        }
        Err(e) => {
            debug!(error = %e, "permalink has a malformed coordinate");
            return Vec::new();
        }
    };

    let pairs: Vec<Coord<f64>> = numbers
        .chunks_exact(2)
        .map(|pair| Coord {
            x: pair[0],
            y: pair[1],
        })
        .collect();

    if pairs.iter().any(|c| !in_range(c)) {
        debug!("permalink coordinate out of range");
        return Vec::new();
    }

    pairs
}

fn in_range(coord: &Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && coord.x.abs() <= 180.0
        && coord.y.abs() <= 90.0
}
