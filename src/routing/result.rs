use wasm_bindgen::prelude::*;

#[derive(Debug, Clone, PartialEq)]
#[wasm_bindgen]
/// Descriptive figures for one route, supplied verbatim by the backend.
///
/// The charging bonus and round-trip figures are backend annotations; the
/// planner never derives them on its own.
pub struct RouteMetrics {
    distance: String,
    duration: String,
    optimization: String,
    bonus_type: Option<String>,
    bonus_value: Option<f64>,
    max_round_trips: Option<u32>,
    message: Option<String>,
}

#[wasm_bindgen]
impl RouteMetrics {
    pub fn distance(&self) -> String {
        self.distance.clone()
    }

    pub fn duration(&self) -> String {
        self.duration.clone()
    }

    /// The optimization criteria the backend reports it applied.
    pub fn optimization(&self) -> String {
        self.optimization.clone()
    }

    #[wasm_bindgen(js_name = bonusType)]
    pub fn bonus_type(&self) -> Option<String> {
        self.bonus_type.clone()
    }

    #[wasm_bindgen(js_name = bonusValue)]
    pub fn bonus_value(&self) -> Option<f64> {
        self.bonus_value
    }

    #[wasm_bindgen(js_name = maxRoundTrips)]
    pub fn max_round_trips(&self) -> Option<u32> {
        self.max_round_trips
    }

    /// The backend's human readable summary, if it sent one.
    pub fn message(&self) -> Option<String> {
        self.message.clone()
    }
}

impl RouteMetrics {
    pub(crate) fn new(
        distance: String,
        duration: String,
        optimization: String,
        bonus_type: Option<String>,
        bonus_value: Option<f64>,
        max_round_trips: Option<u32>,
        message: Option<String>,
    ) -> RouteMetrics {
        RouteMetrics {
            distance,
            duration,
            optimization,
            bonus_type,
            bonus_value,
            max_round_trips,
            message,
        }
    }
}

#[derive(Debug, Clone)]
#[wasm_bindgen]
/// One ranked route inside a calculation result.
pub struct RouteCandidate {
    index: u32,
    encoded_path: String,
    node_count: u32,
    metrics: RouteMetrics,
    total_distance_meters: f64,
    feasible: bool,
}

#[wasm_bindgen]
impl RouteCandidate {
    /// The backend's rank of this candidate, unique within one result set.
    pub fn index(&self) -> u32 {
        self.index
    }

    #[wasm_bindgen(js_name = encodedPath)]
    /// The still-encoded polyline; decoding happens on selection.
    pub fn encoded_path(&self) -> String {
        self.encoded_path.clone()
    }

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn metrics(&self) -> RouteMetrics {
        self.metrics.clone()
    }

    #[wasm_bindgen(js_name = totalDistanceMeters)]
    pub fn total_distance_meters(&self) -> f64 {
        self.total_distance_meters
    }

    #[wasm_bindgen(js_name = isFeasible)]
    /// Whether the backend judged the route drivable on the available
    /// charge.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }
}

impl RouteCandidate {
    pub(crate) fn new(
        index: u32,
        encoded_path: String,
        node_count: u32,
        metrics: RouteMetrics,
        total_distance_meters: f64,
        feasible: bool,
    ) -> RouteCandidate {
        RouteCandidate {
            index,
            encoded_path,
            node_count,
            metrics,
            total_distance_meters,
            feasible,
        }
    }

    pub(crate) fn encoded(&self) -> &str {
        &self.encoded_path
    }
}

#[derive(Debug, Clone)]
#[wasm_bindgen]
/// A complete calculation outcome: the chosen route plus its ranked
/// alternatives. Produced atomically, never partially populated.
pub struct RouteResult {
    primary: RouteCandidate,
    alternatives: Vec<RouteCandidate>,
}

#[wasm_bindgen]
impl RouteResult {
    pub fn primary(&self) -> RouteCandidate {
        self.primary.clone()
    }

    pub fn alternatives(&self) -> Vec<RouteCandidate> {
        self.alternatives.clone()
    }

    #[wasm_bindgen(js_name = alternativesLength)]
    pub fn alternatives_len(&self) -> usize {
        self.alternatives.len()
    }
}

impl RouteResult {
    pub(crate) fn new(primary: RouteCandidate, alternatives: Vec<RouteCandidate>) -> RouteResult {
        RouteResult {
            primary,
            alternatives,
        }
    }

    pub(crate) fn primary_ref(&self) -> &RouteCandidate {
        &self.primary
    }

    pub(crate) fn alternative(&self, index: usize) -> Option<&RouteCandidate> {
        self.alternatives.get(index)
    }
}
