//! Conversion from Pelias features to places.

use geo::{Coord, Rect};
use tracing::debug;

use crate::domain::Place;

use super::types::{FeatureCollection, FeatureDto};

/// Error converting a single feature.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Feature did not match the expected shape
    #[error("malformed feature: {0}")]
    Malformed(String),

    /// Point geometry had fewer than two coordinates
    #[error("feature geometry has no point coordinates")]
    MissingCoordinates,
}

/// Convert every usable feature of a response, in order.
///
/// Malformed features are skipped rather than failing the whole response.
pub fn convert_feature_collection(collection: FeatureCollection) -> Vec<Place> {
    collection
        .features
        .into_iter()
        .filter_map(|raw| match convert_feature(raw) {
            Ok(place) => Some(place),
            Err(e) => {
                debug!(error = %e, "skipping geocode feature");
                None
            }
        })
        .collect()
}

/// Convert one raw GeoJSON feature.
pub fn convert_feature(raw: serde_json::Value) -> Result<Place, ConversionError> {
    let dto: FeatureDto = serde_json::from_value(raw.clone())
        .map_err(|e| ConversionError::Malformed(e.to_string()))?;

    let [x, y] = match dto.geometry.coordinates.as_slice() {
        [x, y, ..] => [*x, *y],
        _ => return Err(ConversionError::MissingCoordinates),
    };

    let label = dto
        .properties
        .label
        .or(dto.properties.name)
        .unwrap_or_default();

    // GeoJSON bbox order is [minX, minY, maxX, maxY]
    let bounds = match dto.bbox.as_deref() {
        Some(&[min_x, min_y, max_x, max_y]) => Some(Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: max_x, y: max_y },
        )),
        _ => None,
    };

    Ok(Place {
        coordinate: Coord { x, y },
        label,
        bounds,
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(label: &str, lon: f64, lat: f64) -> serde_json::Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lon, lat] },
            "properties": { "label": label, "name": label }
        })
    }

    #[test]
    fn converts_point_feature() {
        let place = convert_feature(feature("Hamburg, Germany", 9.99, 53.55)).unwrap();

        assert_eq!(place.coordinate, Coord { x: 9.99, y: 53.55 });
        assert_eq!(place.label, "Hamburg, Germany");
        assert_eq!(place.bounds, None);
        assert_eq!(place.raw["properties"]["name"], "Hamburg, Germany");
    }

    #[test]
    fn converts_bbox_to_bounds() {
        let mut raw = feature("Hamburg", 9.99, 53.55);
        raw["bbox"] = json!([9.7, 53.3, 10.3, 53.7]);

        let place = convert_feature(raw).unwrap();
        assert_eq!(place.bounds_sw_ne(), Some([[53.3, 9.7], [53.7, 10.3]]));
    }

    #[test]
    fn short_bbox_is_ignored() {
        let mut raw = feature("Hamburg", 9.99, 53.55);
        raw["bbox"] = json!([9.7, 53.3]);
        assert_eq!(convert_feature(raw).unwrap().bounds, None);
    }

    #[test]
    fn falls_back_to_name() {
        let raw = json!({
            "geometry": { "coordinates": [1.0, 2.0] },
            "properties": { "name": "Just a name" }
        });
        assert_eq!(convert_feature(raw).unwrap().label, "Just a name");
    }

    #[test]
    fn rejects_missing_coordinates() {
        let raw = json!({ "geometry": { "coordinates": [1.0] } });
        assert!(matches!(
            convert_feature(raw),
            Err(ConversionError::MissingCoordinates)
        ));

        let raw = json!({ "properties": { "label": "no geometry" } });
        assert!(matches!(
            convert_feature(raw),
            Err(ConversionError::Malformed(_))
        ));
    }

    #[test]
    fn collection_skips_bad_features_and_keeps_order() {
        let collection = FeatureCollection {
            features: vec![
                feature("First", 1.0, 1.0),
                json!({ "nonsense": true }),
                feature("Second", 2.0, 2.0),
            ],
        };

        let places = convert_feature_collection(collection);
        let labels: Vec<_> = places.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["First", "Second"]);
    }
}
