//! Pelias response DTOs.
//!
//! Pelias answers both search and reverse requests with a GeoJSON
//! `FeatureCollection`. Features are kept as raw JSON so the full payload
//! can travel with the converted [`Place`](crate::domain::Place).

use serde::Deserialize;

/// Top-level GeoJSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<serde_json::Value>,
}

/// The parts of a feature we read.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureDto {
    pub geometry: GeometryDto,

    #[serde(default)]
    pub properties: PropertiesDto,

    /// `[minX, minY, maxX, maxY]`, only for non-point geometries.
    pub bbox: Option<Vec<f64>>,
}

/// Feature geometry. Pelias always returns points.
#[derive(Debug, Clone, Deserialize)]
pub struct GeometryDto {
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// `[lon, lat]`
    pub coordinates: Vec<f64>,
}

/// Feature properties.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertiesDto {
    pub label: Option<String>,
    pub name: Option<String>,
}
