//! Conversion from engine responses to route data.

use crate::domain::LatLng;

use super::error::RouteError;
use super::polyline::{VALHALLA_PRECISION, decode_polyline};
use super::types::RouteResponseDto;

/// Length and duration of a computed route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub length_km: f64,
    pub time_secs: f64,
}

/// A successful route response.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    /// Encoded shape of each leg, in order.
    pub geometry: Vec<String>,
    pub summary: Option<RouteSummary>,
    /// The full engine payload.
    pub raw: serde_json::Value,
}

impl RouteResponse {
    /// Decode every leg shape into a single continuous path.
    pub fn decode_geometry(&self) -> Result<Vec<LatLng>, RouteError> {
        let mut path = Vec::new();
        for shape in &self.geometry {
            path.extend(decode_polyline(shape, VALHALLA_PRECISION)?);
        }
        Ok(path)
    }
}

/// Convert a raw `/route` response body.
pub fn convert_route_response(raw: serde_json::Value) -> Result<RouteResponse, RouteError> {
    let dto: RouteResponseDto =
        serde_json::from_value(raw.clone()).map_err(|e| RouteError::Json {
            message: e.to_string(),
            body: None,
        })?;

    Ok(RouteResponse {
        geometry: dto.trip.legs.into_iter().map(|leg| leg.shape).collect(),
        summary: dto.trip.summary.map(|s| RouteSummary {
            length_km: s.length,
            time_secs: s.time,
        }),
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_legs_and_summary() {
        let raw = json!({
            "trip": {
                "legs": [{ "shape": "_p~iF~ps|U" }, { "shape": "_ulLnnqC" }],
                "summary": { "length": 3.2, "time": 240.0 }
            }
        });

        let response = convert_route_response(raw.clone()).unwrap();

        assert_eq!(response.geometry, ["_p~iF~ps|U", "_ulLnnqC"]);
        assert_eq!(
            response.summary,
            Some(RouteSummary {
                length_km: 3.2,
                time_secs: 240.0
            })
        );
        assert_eq!(response.raw, raw);
    }

    #[test]
    fn legs_are_decoded_into_one_path() {
        let response = RouteResponse {
            geometry: vec!["_p~iF~ps|U".into(), "_p~iF~ps|U".into()],
            summary: None,
            raw: serde_json::Value::Null,
        };

        let path = response.decode_geometry().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], path[1]);
    }

    #[test]
    fn bad_shape_is_geometry_error() {
        let response = RouteResponse {
            geometry: vec!["_p~iF".into()],
            summary: None,
            raw: serde_json::Value::Null,
        };
        assert!(matches!(
            response.decode_geometry(),
            Err(RouteError::Geometry(_))
        ));
    }

    #[test]
    fn missing_trip_is_json_error() {
        assert!(matches!(
            convert_route_response(json!({ "id": "x" })),
            Err(RouteError::Json { .. })
        ));
    }
}
