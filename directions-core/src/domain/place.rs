//! Geocoded places.

use geo::{Coord, Rect};

/// A place returned by the geocoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    /// Point location, `x = longitude`, `y = latitude`.
    pub coordinate: Coord<f64>,
    /// Human-readable label.
    pub label: String,
    /// Extent of the place. Only present for non-point geometries.
    pub bounds: Option<Rect<f64>>,
    /// The full feature payload as returned by the geocoder.
    pub raw: serde_json::Value,
}

impl Place {
    /// Bounds as `[[south, west], [north, east]]`, the order map viewers expect.
    pub fn bounds_sw_ne(&self) -> Option<[[f64; 2]; 2]> {
        self.bounds.map(|rect| {
            let min = rect.min();
            let max = rect.max();
            [[min.y, min.x], [max.y, max.x]]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_south_west_north_east() {
        let place = Place {
            coordinate: Coord { x: 10.0, y: 50.0 },
            label: "Somewhere".to_string(),
            bounds: Some(Rect::new(
                Coord { x: 9.5, y: 49.5 },
                Coord { x: 10.5, y: 50.5 },
            )),
            raw: serde_json::Value::Null,
        };

        assert_eq!(place.bounds_sw_ne(), Some([[49.5, 9.5], [50.5, 10.5]]));
    }

    #[test]
    fn point_places_have_no_bounds() {
        let place = Place {
            coordinate: Coord { x: 10.0, y: 50.0 },
            label: "Somewhere".to_string(),
            bounds: None,
            raw: serde_json::Value::Null,
        };
        assert_eq!(place.bounds_sw_ne(), None);
    }
}
