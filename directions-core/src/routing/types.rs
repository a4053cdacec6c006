//! Valhalla request and response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::CostingSettings;

/// A `/route` request body, sent as the `json` query parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRequest {
    /// Costing model, e.g. `auto` or `bicycle`.
    pub costing: &'static str,

    /// Options for the costing model, keyed by costing name.
    pub costing_options: BTreeMap<&'static str, CostingSettings>,

    /// Ordered stops.
    pub locations: Vec<Location>,

    pub directions_options: DirectionsOptions,

    /// Echoed back by the engine.
    pub id: String,
}

/// A stop in a route request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Narrative options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionsOptions {
    pub units: &'static str,
}

impl Default for DirectionsOptions {
    fn default() -> Self {
        Self {
            units: "kilometers",
        }
    }
}

/// Successful `/route` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponseDto {
    pub trip: TripDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TripDto {
    #[serde(default)]
    pub legs: Vec<LegDto>,
    pub summary: Option<SummaryDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegDto {
    /// Encoded polyline, precision 6.
    pub shape: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SummaryDto {
    /// Length in the requested units.
    pub length: f64,
    /// Time in seconds.
    pub time: f64,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
    pub error_code: Option<u32>,
    pub status: Option<String>,
    pub status_code: Option<u16>,
}
