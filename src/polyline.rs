//! Codec for the compact polyline text format used by mapping backends.
//!
//! Coordinates are scaled to a 1e-5 degree grid, delta-encoded against the
//! previous point, zigzagged into unsigned integers and emitted as 5-bit
//! chunks with a continuation bit, offset by 63 into printable ASCII.

use crate::debug::debug_log;
use crate::geo_types::{GeoPoint, RoutePath};
use thiserror::Error;
use wasm_bindgen::prelude::*;

const SCALE: f64 = 1e5;

// A zigzagged 32 bit delta spans at most seven 5-bit chunks.
const MAX_SHIFT: u32 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
/// Reasons an encoded polyline cannot be decoded.
pub enum DecodeError {
    #[error("encoding truncated at byte {0}")]
    Truncated(usize),
    #[error("continuation chain exceeds a single delta at byte {0}")]
    DeltaOverflow(usize),
    #[error("byte {1:#04x} at offset {0} is outside the encodable range")]
    InvalidByte(usize, u8),
}

/// Decodes an encoded polyline into its coordinate sequence.
pub fn decode(encoded: &str) -> Result<RoutePath, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();
    while cursor < bytes.len() {
        lat += next_delta(bytes, &mut cursor)?;
        lng += next_delta(bytes, &mut cursor)?;
        points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
    }
    debug_log!("decoded {} points from {} bytes", points.len(), bytes.len());
    Ok(RoutePath::new(points))
}

/// Encodes a coordinate sequence; the exact inverse of [`decode`].
pub fn encode(path: &RoutePath) -> String {
    let mut out = String::new();
    let mut previous_lat: i64 = 0;
    let mut previous_lng: i64 = 0;
    for point in path.points() {
        let lat = scaled(point.lat());
        let lng = scaled(point.lng());
        push_delta(&mut out, lat - previous_lat);
        push_delta(&mut out, lng - previous_lng);
        previous_lat = lat;
        previous_lng = lng;
    }
    out
}

#[wasm_bindgen(js_name = decodePolyline)]
/// Decodes an encoded polyline into a path.
pub fn decode_polyline(encoded: &str) -> Result<RoutePath, JsError> {
    Ok(decode(encoded)?)
}

#[wasm_bindgen(js_name = encodePolyline)]
/// Encodes a path into the compact polyline text format.
pub fn encode_polyline(path: &RoutePath) -> String {
    encode(path)
}

fn scaled(coordinate: f64) -> i64 {
    (coordinate * SCALE).round() as i64
}

// Reads one delta: 5-bit chunks accumulated little-endian while the 0x20
// continuation bit is set, then un-zigzagged.
fn next_delta(bytes: &[u8], cursor: &mut usize) -> Result<i64, DecodeError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = *bytes.get(*cursor).ok_or(DecodeError::Truncated(*cursor))?;
        if !(63..=126).contains(&byte) {
            return Err(DecodeError::InvalidByte(*cursor, byte));
        }
        let chunk = (byte - 63) as u64;
        value |= (chunk & 0x1f) << shift;
        *cursor += 1;
        if chunk & 0x20 == 0 {
            break;
        }
        shift += 5;
        if shift > MAX_SHIFT {
            return Err(DecodeError::DeltaOverflow(*cursor));
        }
    }
    if value & 1 == 1 {
        Ok(-(((value + 1) >> 1) as i64))
    } else {
        Ok((value >> 1) as i64)
    }
}

fn push_delta(out: &mut String, delta: i64) {
    let mut value = (delta << 1) as u64;
    if delta < 0 {
        value = !value;
    }
    loop {
        let mut chunk = (value & 0x1f) as u8;
        value >>= 5;
        if value > 0 {
            chunk |= 0x20;
        }
        out.push((chunk + 63) as char);
        if value == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The reference example from the format documentation.
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(38.5, -120.2),
            GeoPoint::new(40.7, -120.95),
            GeoPoint::new(43.252, -126.453),
        ]
    }

    #[test]
    fn decode_reference() {
        let path = decode(REFERENCE).unwrap();
        assert_eq!(path.points(), reference_points());
    }

    #[test]
    fn encode_reference() {
        let path = RoutePath::new(reference_points());
        assert_eq!(encode(&path), REFERENCE);
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("").unwrap().len(), 0);
    }

    #[test]
    fn encode_zero_delta() {
        let path = RoutePath::new(vec![GeoPoint::new(0.0, 0.0)]);
        assert_eq!(encode(&path), "??");
        assert_eq!(decode("??").unwrap(), path);
    }

    #[test]
    fn truncated_mid_chunk() {
        // The final chunk of the second delta is cut off.
        assert_eq!(decode("_p~iF~ps|"), Err(DecodeError::Truncated(9)));
    }

    #[test]
    fn truncated_mid_pair() {
        // A latitude delta without its longitude partner.
        assert_eq!(decode("_p~iF"), Err(DecodeError::Truncated(5)));
    }

    #[test]
    fn overlong_continuation_chain() {
        // Eight chunks all carrying the continuation bit.
        assert_eq!(decode("````````"), Err(DecodeError::DeltaOverflow(7)));
    }

    #[test]
    fn rejects_bytes_outside_range() {
        assert_eq!(decode(" "), Err(DecodeError::InvalidByte(0, b' ')));
    }

    #[test]
    fn round_trip_on_grid() {
        // A deterministic pseudo-random walk on the 1e-5 grid.
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        let mut points = Vec::with_capacity(1000);
        for _ in 0..1000 {
            let lat = (next() % 17_000_000) as i64 - 8_500_000;
            let lng = (next() % 35_000_000) as i64 - 17_500_000;
            points.push(GeoPoint::new(lat as f64 / SCALE, lng as f64 / SCALE));
        }
        let path = RoutePath::new(points);
        assert_eq!(decode(&encode(&path)).unwrap(), path);
    }

    #[test]
    fn round_trip_negative_walk() {
        let path = RoutePath::new(vec![
            GeoPoint::new(-89.99999, -179.99999),
            GeoPoint::new(89.99999, 179.99999),
            GeoPoint::new(0.00001, -0.00001),
        ]);
        assert_eq!(decode(&encode(&path)).unwrap(), path);
    }
}
