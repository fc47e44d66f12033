use super::GeoPoint;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq)]
#[wasm_bindgen]
/// A decoded route geometry; an ordered sequence of coordinates.
pub struct RoutePath(geo::LineString<f64>);

#[wasm_bindgen]
impl RoutePath {
    #[wasm_bindgen(constructor)]
    pub fn new(points: Vec<GeoPoint>) -> RoutePath {
        let coords: Vec<geo::Coord<f64>> = points
            .into_iter()
            .map(|point| geo::Coord {
                x: point.lng(),
                y: point.lat(),
            })
            .collect();
        RoutePath(geo::LineString::new(coords))
    }

    #[wasm_bindgen(js_name = length)]
    /// Returns the number of coordinates on the path.
    pub fn len(&self) -> usize {
        self.0 .0.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.0 .0.is_empty()
    }

    /// Returns the coordinate at `index`, if any.
    pub fn get(&self, index: usize) -> Option<GeoPoint> {
        self.0 .0.get(index).map(|coord| GeoPoint::new(coord.y, coord.x))
    }

    /// Returns all coordinates of the path.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.0
             .0
            .iter()
            .map(|coord| GeoPoint::new(coord.y, coord.x))
            .collect()
    }
}

impl From<RoutePath> for geo::LineString<f64> {
    fn from(value: RoutePath) -> Self {
        value.0
    }
}

impl From<geo::LineString<f64>> for RoutePath {
    fn from(value: geo::LineString<f64>) -> RoutePath {
        RoutePath(value)
    }
}

impl RoutePath {
    pub(crate) fn line_string(&self) -> &geo::LineString<f64> {
        &self.0
    }
}
