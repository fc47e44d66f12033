use super::{GeoPoint, RoutePath};
use ::geo::BoundingRect;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq)]
#[wasm_bindgen]
/// An axis-aligned latitude/longitude rectangle.
pub struct LatLngBounds {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

#[wasm_bindgen]
impl LatLngBounds {
    #[wasm_bindgen(constructor)]
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> LatLngBounds {
        LatLngBounds {
            south,
            west,
            north,
            east,
        }
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    /// Grows the rectangle to cover the given coordinate.
    pub fn extend(&mut self, point: &GeoPoint) {
        self.south = self.south.min(point.lat());
        self.north = self.north.max(point.lat());
        self.west = self.west.min(point.lng());
        self.east = self.east.max(point.lng());
    }

    /// Returns the center of the rectangle.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

impl LatLngBounds {
    fn around(point: &GeoPoint) -> LatLngBounds {
        LatLngBounds::new(point.lat(), point.lng(), point.lat(), point.lng())
    }
}

#[wasm_bindgen(js_name = computeViewportBounds)]
/// Returns the minimal rectangle covering every point of `path` plus the
/// given endpoints.
///
/// A single covered point yields a zero-area rectangle; enforcing a minimum
/// zoom floor on it is the map widget's job.
pub fn compute_viewport_bounds(
    path: &RoutePath,
    start: Option<GeoPoint>,
    end: Option<GeoPoint>,
) -> Option<LatLngBounds> {
    let endpoints: Vec<&GeoPoint> = start.iter().chain(end.iter()).collect();
    covering_bounds(Some(path), &endpoints)
}

/// Computes the minimal rectangle covering the path and the extra points.
///
/// Returns None if there is nothing to cover at all.
pub fn covering_bounds(
    path: Option<&RoutePath>,
    points: &[&GeoPoint],
) -> Option<LatLngBounds> {
    let mut bounds = path
        .and_then(|path| path.line_string().bounding_rect())
        .map(|rect| LatLngBounds::new(rect.min().y, rect.min().x, rect.max().y, rect.max().x));
    for point in points {
        match bounds.as_mut() {
            Some(bounds) => bounds.extend(point),
            None => bounds = Some(LatLngBounds::around(point)),
        }
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_path_and_endpoints() {
        let path = RoutePath::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        let bounds = compute_viewport_bounds(
            &path,
            Some(GeoPoint::new(0.0, 0.0)),
            Some(GeoPoint::new(1.0, 1.0)),
        )
        .unwrap();
        assert_eq!(bounds.south(), 0.0);
        assert_eq!(bounds.west(), 0.0);
        assert_eq!(bounds.north(), 1.0);
        assert_eq!(bounds.east(), 1.0);
    }

    #[test]
    fn endpoints_outside_path() {
        let path = RoutePath::new(vec![GeoPoint::new(0.5, 0.5)]);
        let bounds = compute_viewport_bounds(
            &path,
            Some(GeoPoint::new(-1.0, 2.0)),
            None,
        )
        .unwrap();
        assert_eq!(bounds.south(), -1.0);
        assert_eq!(bounds.west(), 0.5);
        assert_eq!(bounds.north(), 0.5);
        assert_eq!(bounds.east(), 2.0);
    }

    #[test]
    fn single_point_is_zero_area() {
        let bounds = covering_bounds(None, &[&GeoPoint::new(12.97, 77.59)]).unwrap();
        assert_eq!(bounds.south(), bounds.north());
        assert_eq!(bounds.west(), bounds.east());
        assert_eq!(bounds.center(), GeoPoint::new(12.97, 77.59));
    }

    #[test]
    fn nothing_to_cover() {
        assert_eq!(covering_bounds(None, &[]), None);
    }
}
