//! Encoded polyline decoding.
//!
//! Valhalla encodes shapes with the Google polyline algorithm at six
//! decimal places of precision. Each value is a zig-zag encoded delta from
//! the previous one, split into 5-bit chunks offset by 63.

use crate::domain::LatLng;

/// Precision used by Valhalla shapes.
pub const VALHALLA_PRECISION: u32 = 6;

/// Error decoding an encoded polyline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolylineError {
    /// Byte outside the polyline alphabet
    #[error("invalid polyline character at byte {0}")]
    InvalidCharacter(usize),

    /// Input ended in the middle of a value or a coordinate pair
    #[error("polyline ends mid-coordinate")]
    Truncated,

    /// A value used more chunks than fit in 64 bits
    #[error("polyline value overflows at byte {0}")]
    Overflow(usize),
}

/// Decode an encoded polyline into latitude/longitude pairs.
///
/// ```
/// use directions_core::routing::decode_polyline;
///
/// let path = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
/// assert_eq!(path.len(), 3);
/// assert!((path[0].lat - 38.5).abs() < 1e-9);
/// assert!((path[0].lng + 120.2).abs() < 1e-9);
/// ```
pub fn decode_polyline(encoded: &str, precision: u32) -> Result<Vec<LatLng>, PolylineError> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut path = Vec::new();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat = lat.wrapping_add(next_value(bytes, &mut pos)?);
        if pos >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        lng = lng.wrapping_add(next_value(bytes, &mut pos)?);

        path.push(LatLng::new(lat as f64 / factor, lng as f64 / factor));
    }

    Ok(path)
}

/// Read one zig-zag encoded delta starting at `pos`.
fn next_value(bytes: &[u8], pos: &mut usize) -> Result<i64, PolylineError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*pos) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) {
            return Err(PolylineError::InvalidCharacter(*pos));
        }
        if shift >= 64 {
            return Err(PolylineError::Overflow(*pos));
        }

        let chunk = u64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        *pos += 1;

        if chunk < 0x20 {
            break;
        }
    }

    let value = (result >> 1) as i64;
    Ok(if result & 1 == 1 { !value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[LatLng], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (a, (lat, lng)) in actual.iter().zip(expected) {
            assert!((a.lat - lat).abs() < 1e-9, "lat {} != {}", a.lat, lat);
            assert!((a.lng - lng).abs() < 1e-9, "lng {} != {}", a.lng, lng);
        }
    }

    #[test]
    fn decodes_reference_example() {
        let path = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
        assert_close(
            &path,
            &[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)],
        );
    }

    #[test]
    fn precision_scales_values() {
        // Same bytes decoded at precision 6 are ten times smaller
        let path = decode_polyline("_p~iF~ps|U", 6).unwrap();
        assert_close(&path, &[(3.85, -12.02)]);
    }

    #[test]
    fn empty_input_is_empty_path() {
        assert_eq!(decode_polyline("", 6).unwrap(), Vec::new());
    }

    #[test]
    fn rejects_bad_characters() {
        assert_eq!(
            decode_polyline("_p~iF ps|U", 5),
            Err(PolylineError::InvalidCharacter(5))
        );
    }

    #[test]
    fn rejects_truncated_input() {
        // Latitude only
        assert_eq!(decode_polyline("_p~iF", 5), Err(PolylineError::Truncated));
        // Continuation chunk with nothing after it
        assert_eq!(decode_polyline("_p~iF~", 5), Err(PolylineError::Truncated));
    }

    #[test]
    fn rejects_overlong_values() {
        let encoded = "~".repeat(20);
        assert!(matches!(
            decode_polyline(&encoded, 6),
            Err(PolylineError::Overflow(_))
        ));
    }
}
