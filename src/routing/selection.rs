use crate::geo_types::GeoPoint;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[wasm_bindgen]
/// Progress of the two-point endpoint selection.
pub enum SelectionPhase {
    /// No endpoint chosen yet.
    Empty,
    /// The start point is chosen, the destination is still open.
    StartOnly,
    /// Both endpoints are chosen.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a single click did to the selection.
pub enum ClickEffect {
    /// The first endpoint was placed; any previous route is obsolete.
    StartPlaced,
    /// The second endpoint was placed; a route request should be issued.
    EndPlaced,
    /// The selection restarted with a fresh start point.
    Restarted,
}

#[derive(Debug, Clone, Default)]
/// The ordered pair of route endpoints.
///
/// `end` is only ever set while `start` is set; the three reachable
/// configurations are both unset, start-only and both set.
pub struct RouteEndpoints {
    start: Option<GeoPoint>,
    end: Option<GeoPoint>,
}

impl RouteEndpoints {
    pub fn phase(&self) -> SelectionPhase {
        match (&self.start, &self.end) {
            (None, None) => SelectionPhase::Empty,
            (Some(_), None) => SelectionPhase::StartOnly,
            (Some(_), Some(_)) => SelectionPhase::Complete,
            // Unreachable by construction; `end` is cleared whenever
            // `start` is replaced.
            (None, Some(_)) => unreachable!("end endpoint without start"),
        }
    }

    /// Applies one click to the selection.
    ///
    /// The transition table is total: every phase has exactly one successor
    /// for a click.
    pub fn click(&mut self, point: GeoPoint) -> ClickEffect {
        match self.phase() {
            SelectionPhase::Empty => {
                self.start = Some(point);
                ClickEffect::StartPlaced
            }
            SelectionPhase::StartOnly => {
                self.end = Some(point);
                ClickEffect::EndPlaced
            }
            SelectionPhase::Complete => {
                self.start = Some(point);
                self.end = None;
                ClickEffect::Restarted
            }
        }
    }

    /// Forces the empty phase unconditionally.
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
    }

    pub fn start(&self) -> Option<&GeoPoint> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&GeoPoint> {
        self.end.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table() {
        let mut endpoints = RouteEndpoints::default();
        assert_eq!(endpoints.phase(), SelectionPhase::Empty);

        let a = GeoPoint::new(12.97, 77.59);
        assert_eq!(endpoints.click(a.clone()), ClickEffect::StartPlaced);
        assert_eq!(endpoints.phase(), SelectionPhase::StartOnly);
        assert_eq!(endpoints.start(), Some(&a));
        assert_eq!(endpoints.end(), None);

        let b = GeoPoint::new(12.98, 77.60);
        assert_eq!(endpoints.click(b.clone()), ClickEffect::EndPlaced);
        assert_eq!(endpoints.phase(), SelectionPhase::Complete);
        assert_eq!(endpoints.start(), Some(&a));
        assert_eq!(endpoints.end(), Some(&b));

        let c = GeoPoint::new(13.00, 77.70);
        assert_eq!(endpoints.click(c.clone()), ClickEffect::Restarted);
        assert_eq!(endpoints.phase(), SelectionPhase::StartOnly);
        assert_eq!(endpoints.start(), Some(&c));
        assert_eq!(endpoints.end(), None);
    }

    #[test]
    fn three_clicks_end_in_start_only() {
        // For any three consecutive clicks the machine lands in start-only
        // with the third point as start.
        let mut endpoints = RouteEndpoints::default();
        let third = GeoPoint::new(3.0, 3.0);
        endpoints.click(GeoPoint::new(1.0, 1.0));
        endpoints.click(GeoPoint::new(2.0, 2.0));
        endpoints.click(third.clone());
        assert_eq!(endpoints.phase(), SelectionPhase::StartOnly);
        assert_eq!(endpoints.start(), Some(&third));
    }

    #[test]
    fn clear_forces_empty() {
        let mut endpoints = RouteEndpoints::default();
        endpoints.click(GeoPoint::new(1.0, 1.0));
        endpoints.click(GeoPoint::new(2.0, 2.0));
        endpoints.clear();
        assert_eq!(endpoints.phase(), SelectionPhase::Empty);
        assert_eq!(endpoints.start(), None);
        assert_eq!(endpoints.end(), None);
    }
}
