use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq)]
#[wasm_bindgen]
/// A geographic coordinate in WGS84 latitude/longitude.
pub struct GeoPoint(geo::Point<f64>);

#[wasm_bindgen]
impl GeoPoint {
    #[wasm_bindgen(constructor)]
    pub fn new(lat: f64, lng: f64) -> GeoPoint {
        let point: geo::Point<f64> = (lng, lat).into();
        GeoPoint::from(point)
    }

    pub fn lat(&self) -> f64 {
        self.0.y()
    }

    pub fn lng(&self) -> f64 {
        self.0.x()
    }

    #[wasm_bindgen(js_name = isInRange)]
    /// Whether the coordinate lies inside the valid WGS84 value ranges
    /// (latitude -90..90, longitude -180..180).
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat()) && (-180.0..=180.0).contains(&self.lng())
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(value: geo::Point<f64>) -> GeoPoint {
        GeoPoint(value)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(value: GeoPoint) -> Self {
        value.0
    }
}
