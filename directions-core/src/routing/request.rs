//! Route request building.

use std::collections::BTreeMap;

use crate::domain::{CostingSettings, Profile, Waypoint};

use super::types::{DirectionsOptions, Location, RouteRequest};

/// Request id echoed by the engine.
const REQUEST_ID: &str = "valhalla_directions";

/// Build a route request from the trip.
///
/// Only active waypoints are sent, in trip order. Settings are narrowed to
/// the options the profile's costing model accepts.
pub fn build_route_request(
    profile: Profile,
    waypoints: &[Waypoint],
    settings: &CostingSettings,
) -> RouteRequest {
    let locations = waypoints
        .iter()
        .filter(|wp| wp.is_active())
        .map(|wp| Location {
            lat: wp.coordinate.y,
            lon: wp.coordinate.x,
            kind: "break",
        })
        .collect();

    let mut costing_options = BTreeMap::new();
    costing_options.insert(profile.costing(), settings.filtered_for(profile));

    RouteRequest {
        costing: profile.costing(),
        costing_options,
        locations,
        directions_options: DirectionsOptions::default(),
        id: REQUEST_ID.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use geo::Coord;
    use serde_json::json;

    use super::*;

    fn active(index: usize, x: f64, y: f64) -> Waypoint {
        let mut wp = Waypoint::empty(index);
        wp.coordinate = Coord { x, y };
        wp
    }

    #[test]
    fn skips_inactive_waypoints_and_keeps_order() {
        let waypoints = vec![
            active(0, 10.0, 50.0),
            Waypoint::empty(1),
            active(2, 11.0, 51.0),
        ];

        let req = build_route_request(Profile::Car, &waypoints, &CostingSettings::new());

        assert_eq!(req.costing, "auto");
        assert_eq!(req.locations.len(), 2);
        assert_eq!(req.locations[0].lon, 10.0);
        assert_eq!(req.locations[0].lat, 50.0);
        assert_eq!(req.locations[1].lon, 11.0);
    }

    #[test]
    fn settings_are_filtered_for_profile() {
        let settings = CostingSettings::new()
            .with("use_highways", 0.0)
            .with("use_roads", 0.3);
        let waypoints = vec![active(0, 1.0, 1.0), active(1, 2.0, 2.0)];

        let req = build_route_request(Profile::Bicycle, &waypoints, &settings);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["costing"], "bicycle");
        assert_eq!(json["costing_options"], json!({ "bicycle": { "use_roads": 0.3 } }));
        assert_eq!(json["directions_options"]["units"], "kilometers");
        assert_eq!(json["locations"][1], json!({ "lat": 2.0, "lon": 2.0, "type": "break" }));
    }
}
