use super::orchestrator::{Failure, RouteOutcome, RouteQuery};
use super::result::{RouteMetrics, RouteResult};
use super::selection::{ClickEffect, RouteEndpoints, SelectionPhase};
use crate::debug::debug_log;
use crate::geo_types::{covering_bounds, GeoPoint, LatLngBounds, RoutePath};
use crate::polyline;
use lru::LruCache;
use std::num::NonZeroUsize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Optimization criteria applied when the user has not chosen one.
pub const DEFAULT_CRITERIA: &str = "fastest";

// Decoded alternatives are cached per result set; indices are only unique
// within one result, so the cache is dropped wholesale on replacement.
const DECODED_CACHE_SIZE: usize = 16;

#[wasm_bindgen(js_name = defaultCenter)]
/// Initial map center shown until the user interacts or geolocation
/// resolves.
pub fn default_center() -> GeoPoint {
    GeoPoint::new(12.9716, 77.5946)
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[wasm_bindgen]
/// Errors raised by route selection operations.
pub enum SelectionError {
    #[error("alternative index out of range")]
    IndexOutOfRange,
    #[error("no route loaded")]
    NoRouteLoaded,
    #[error("alternative polyline is malformed")]
    MalformedPolyline,
}

#[wasm_bindgen]
/// The headless route-planning core.
///
/// Owns the whole interaction state: the endpoint selection, the active
/// result and path, the displayed metrics and the request epoch. Every
/// mutation happens in reaction to one discrete external event and runs to
/// completion; the browser event loop provides the serialization, so no
/// locking is involved. Readers always observe a fully consistent snapshot.
///
/// The planner itself never performs I/O. It hands out [`RouteQuery`]
/// values for [`super::RouteClient`] to execute and consumes the resulting
/// [`RouteOutcome`]s, discarding any that a newer request or a reset has
/// superseded.
pub struct RoutePlanner {
    endpoints: RouteEndpoints,
    criteria: String,
    epoch: u32,
    pending: bool,
    result: Option<RouteResult>,
    primary_path: Option<RoutePath>,
    active_path: Option<RoutePath>,
    selected_alternative: Option<u32>,
    metrics: Option<RouteMetrics>,
    last_failure: Option<Failure>,
    decoded_alternatives: LruCache<u32, RoutePath>,
}

#[wasm_bindgen]
impl RoutePlanner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> RoutePlanner {
        console_error_panic_hook::set_once();
        RoutePlanner {
            endpoints: RouteEndpoints::default(),
            criteria: DEFAULT_CRITERIA.to_string(),
            epoch: 0,
            pending: false,
            result: None,
            primary_path: None,
            active_path: None,
            selected_alternative: None,
            metrics: None,
            last_failure: None,
            decoded_alternatives: LruCache::new(NonZeroUsize::new(DECODED_CACHE_SIZE).unwrap()),
        }
    }

    #[wasm_bindgen(js_name = pointClicked)]
    /// Feeds one map click into the selection machine.
    ///
    /// Returns the query to execute when the click completed the endpoint
    /// pair, `None` otherwise. A click that restarts the selection also
    /// supersedes any request still in flight.
    pub fn point_clicked(&mut self, point: &GeoPoint) -> Option<RouteQuery> {
        match self.endpoints.click(point.clone()) {
            ClickEffect::StartPlaced | ClickEffect::Restarted => {
                debug_log!("selection (re)started at {:?}", point);
                self.clear_result();
                self.supersede();
                None
            }
            ClickEffect::EndPlaced => Some(self.issue_query()),
        }
    }

    /// Clears the whole interaction state.
    ///
    /// Any in-flight request is implicitly cancelled: its outcome will
    /// arrive under a stale epoch and be discarded.
    pub fn reset(&mut self) {
        self.endpoints.clear();
        self.clear_result();
        self.supersede();
    }

    /// Re-issues the current route request, superseding any unfinished
    /// one. Returns `None` unless both endpoints are set.
    pub fn recalculate(&mut self) -> Option<RouteQuery> {
        if self.endpoints.phase() != SelectionPhase::Complete {
            return None;
        }
        Some(self.issue_query())
    }

    #[wasm_bindgen(js_name = setCriteria)]
    /// Switches the optimization criteria.
    ///
    /// When both endpoints are already set the route is recalculated under
    /// the new criteria; the returned query supersedes any unfinished one.
    pub fn set_criteria(&mut self, criteria: String) -> Option<RouteQuery> {
        self.criteria = criteria;
        self.recalculate()
    }

    /// Applies a request outcome to the state.
    ///
    /// Returns `false` when the outcome was stale and was discarded
    /// without touching anything. A failure outcome keeps the previously
    /// displayed route; only the displayed figures are dropped.
    pub fn apply(&mut self, outcome: &RouteOutcome) -> bool {
        if outcome.epoch() != self.epoch {
            debug_log!(
                "discarding stale outcome, epoch {} != {}",
                outcome.epoch(),
                self.epoch
            );
            return false;
        }
        self.pending = false;
        match outcome.calculated() {
            Some(calculated) => {
                self.decoded_alternatives.clear();
                self.result = Some(calculated.result.clone());
                self.primary_path = Some(calculated.primary_path.clone());
                self.active_path = Some(calculated.primary_path.clone());
                self.selected_alternative = None;
                self.metrics = Some(calculated.result.primary_ref().metrics());
                self.last_failure = None;
            }
            None => {
                self.metrics = None;
                self.last_failure = outcome.failure();
            }
        }
        true
    }

    #[wasm_bindgen(js_name = selectPrimary)]
    /// Makes the primary route the active one again.
    pub fn select_primary(&mut self) {
        if let (Some(result), Some(primary)) = (&self.result, &self.primary_path) {
            self.active_path = Some(primary.clone());
            self.selected_alternative = None;
            self.metrics = Some(result.primary_ref().metrics());
        }
    }

    #[wasm_bindgen(js_name = selectAlternative)]
    /// Makes the alternative at `index` the active route.
    ///
    /// The candidate's polyline is decoded on first access and cached for
    /// the lifetime of the current result set.
    pub fn select_alternative(&mut self, index: u32) -> Result<(), SelectionError> {
        let result = self.result.as_ref().ok_or(SelectionError::NoRouteLoaded)?;
        let candidate = result
            .alternative(index as usize)
            .ok_or(SelectionError::IndexOutOfRange)?;
        let path = match self.decoded_alternatives.get(&index) {
            Some(path) => path.clone(),
            None => {
                let path = polyline::decode(candidate.encoded())
                    .map_err(|_| SelectionError::MalformedPolyline)?;
                self.decoded_alternatives.put(index, path.clone());
                path
            }
        };
        self.metrics = Some(candidate.metrics());
        self.active_path = Some(path);
        self.selected_alternative = Some(index);
        Ok(())
    }

    #[wasm_bindgen(js_name = resetToDefault)]
    /// Reselects the primary route without refetching; the fetched
    /// alternatives stay available.
    pub fn reset_to_default(&mut self) {
        self.select_primary();
    }

    #[wasm_bindgen(js_name = selectionPhase)]
    pub fn selection_phase(&self) -> SelectionPhase {
        self.endpoints.phase()
    }

    /// The start marker position, if placed.
    pub fn start(&self) -> Option<GeoPoint> {
        self.endpoints.start().cloned()
    }

    /// The destination marker position, if placed.
    pub fn end(&self) -> Option<GeoPoint> {
        self.endpoints.end().cloned()
    }

    #[wasm_bindgen(js_name = activePath)]
    /// The decoded path the map should render, if any.
    pub fn active_path(&self) -> Option<RoutePath> {
        self.active_path.clone()
    }

    /// The current result set, if any.
    pub fn result(&self) -> Option<RouteResult> {
        self.result.clone()
    }

    /// The figures the panel should display, if any.
    pub fn metrics(&self) -> Option<RouteMetrics> {
        self.metrics.clone()
    }

    #[wasm_bindgen(js_name = selectedAlternativeIndex)]
    /// `None` means the primary path is active.
    pub fn selected_alternative_index(&self) -> Option<u32> {
        self.selected_alternative
    }

    pub fn criteria(&self) -> String {
        self.criteria.clone()
    }

    #[wasm_bindgen(js_name = requestEpoch)]
    pub fn request_epoch(&self) -> u32 {
        self.epoch
    }

    #[wasm_bindgen(js_name = isPending)]
    /// Whether a query has been issued whose outcome has not arrived yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    #[wasm_bindgen(js_name = lastFailure)]
    /// The failure of the most recent request, if it failed.
    pub fn last_failure(&self) -> Option<Failure> {
        self.last_failure.clone()
    }

    #[wasm_bindgen(js_name = viewportBounds)]
    /// The minimal rectangle the map should fit: every point of the
    /// active path plus both endpoints.
    pub fn viewport_bounds(&self) -> Option<LatLngBounds> {
        let endpoints: Vec<&GeoPoint> = self
            .endpoints
            .start()
            .into_iter()
            .chain(self.endpoints.end())
            .collect();
        covering_bounds(self.active_path.as_ref(), &endpoints)
    }
}

impl RoutePlanner {
    fn issue_query(&mut self) -> RouteQuery {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = true;
        let start = self
            .endpoints
            .start()
            .cloned()
            .expect("query issued without start endpoint");
        let end = self
            .endpoints
            .end()
            .cloned()
            .expect("query issued without end endpoint");
        debug_log!("issuing query, epoch {}: {:?} -> {:?}", self.epoch, start, end);
        RouteQuery::new(start, end, self.criteria.clone(), self.epoch)
    }

    // Every path to a new or absent route goes through here; the aggregate
    // moves from one consistent snapshot to the next.
    fn clear_result(&mut self) {
        self.result = None;
        self.primary_path = None;
        self.active_path = None;
        self.selected_alternative = None;
        self.metrics = None;
        self.last_failure = None;
        self.decoded_alternatives.clear();
    }

    fn supersede(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending = false;
    }
}
