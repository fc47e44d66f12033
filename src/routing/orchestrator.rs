use super::result::{RouteCandidate, RouteMetrics, RouteResult};
use super::wire::{AlternativePayload, CalculateRouteBody, ErrorPayload, RoutePayload};
use crate::backend::{FetchTransport, Reply, Transport, TransportError};
use crate::debug::debug_log;
use crate::geo_types::{GeoPoint, RoutePath};
use crate::polyline;
use wasm_bindgen::prelude::*;

#[derive(Debug, Clone)]
#[wasm_bindgen]
/// Everything needed to issue one route calculation.
///
/// Produced by [`super::RoutePlanner`] when a click or a recalculation
/// completes the endpoint pair; handed to [`RouteClient::request_route`].
pub struct RouteQuery {
    pub(crate) start: GeoPoint,
    pub(crate) end: GeoPoint,
    pub(crate) criteria: String,
    pub(crate) epoch: u32,
}

#[wasm_bindgen]
impl RouteQuery {
    pub fn start(&self) -> GeoPoint {
        self.start.clone()
    }

    pub fn end(&self) -> GeoPoint {
        self.end.clone()
    }

    pub fn criteria(&self) -> String {
        self.criteria.clone()
    }

    /// The request counter this query was issued under.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}

impl RouteQuery {
    pub(crate) fn new(start: GeoPoint, end: GeoPoint, criteria: String, epoch: u32) -> RouteQuery {
        RouteQuery {
            start,
            end,
            criteria,
            epoch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[wasm_bindgen]
/// Classification of a failed route request.
pub enum FailureKind {
    /// Transport failure or timeout; worth retrying.
    Network,
    /// The backend answered with a non-2xx status.
    Http,
    /// A well-formed reply in which the backend signals failure.
    Semantic,
    /// The reply carried a malformed polyline.
    Decode,
}

#[derive(Debug, Clone)]
#[wasm_bindgen]
/// A recovered route-request failure.
///
/// Failures are values, never panics; the interaction core must survive
/// every one of them.
pub struct Failure {
    kind: FailureKind,
    detail: String,
}

#[wasm_bindgen]
impl Failure {
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Human readable detail, surfaced verbatim where the backend sent one.
    pub fn detail(&self) -> String {
        self.detail.clone()
    }
}

impl Failure {
    pub(crate) fn new(kind: FailureKind, detail: String) -> Failure {
        Failure { kind, detail }
    }
}

/// A successful calculation with its primary path already decoded.
///
/// Alternatives keep their encoded form until selected.
#[derive(Debug, Clone)]
pub(crate) struct CalculatedRoute {
    pub(crate) result: RouteResult,
    pub(crate) primary_path: RoutePath,
}

#[derive(Debug)]
#[wasm_bindgen]
/// The uniform completion value of one route request.
///
/// Carries the epoch of its originating query so the planner can discard
/// it when a newer request or a reset has superseded it.
pub struct RouteOutcome {
    epoch: u32,
    route: Option<CalculatedRoute>,
    failure: Option<Failure>,
}

#[wasm_bindgen]
impl RouteOutcome {
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    #[wasm_bindgen(js_name = isSuccess)]
    pub fn is_success(&self) -> bool {
        self.route.is_some()
    }

    pub fn failure(&self) -> Option<Failure> {
        self.failure.clone()
    }
}

impl RouteOutcome {
    pub(crate) fn from_result(
        epoch: u32,
        result: Result<CalculatedRoute, Failure>,
    ) -> RouteOutcome {
        match result {
            Ok(route) => RouteOutcome {
                epoch,
                route: Some(route),
                failure: None,
            },
            Err(failure) => RouteOutcome {
                epoch,
                route: None,
                failure: Some(failure),
            },
        }
    }

    pub(crate) fn calculated(&self) -> Option<&CalculatedRoute> {
        self.route.as_ref()
    }
}

/// Executes one route query against the given transport and normalizes
/// every possible ending into a [`RouteOutcome`].
pub async fn calculate_route<T: Transport>(
    transport: &T,
    user: Option<&str>,
    query: &RouteQuery,
) -> RouteOutcome {
    let body = CalculateRouteBody {
        start_lat: query.start.lat(),
        start_lng: query.start.lng(),
        end_lat: query.end.lat(),
        end_lng: query.end.lng(),
        optimization_criteria: query.criteria.clone(),
        mode: "driving",
    };
    let payload = serde_json::to_string(&body).expect("request body serializes");
    debug_log!("calculating route, epoch {}", query.epoch);
    let result = match transport.execute(&payload, user).await {
        Ok(reply) => interpret(&reply, &query.criteria),
        Err(err) => Err(transport_failure(err)),
    };
    RouteOutcome::from_result(query.epoch, result)
}

fn transport_failure(err: TransportError) -> Failure {
    // A timeout is indistinguishable from any other transport loss for the
    // caller; both are retryable.
    Failure::new(FailureKind::Network, err.to_string())
}

// Turns a raw reply into a calculated route or a classified failure.
pub(crate) fn interpret(reply: &Reply, criteria: &str) -> Result<CalculatedRoute, Failure> {
    if !(200..300).contains(&reply.status) {
        let detail = serde_json::from_str::<ErrorPayload>(&reply.body)
            .ok()
            .and_then(|payload| payload.detail)
            .unwrap_or_else(|| format!("HTTP status {}", reply.status));
        return Err(Failure::new(FailureKind::Http, detail));
    }
    let payload: RoutePayload = serde_json::from_str(&reply.body).map_err(|err| {
        Failure::new(FailureKind::Semantic, format!("malformed payload: {}", err))
    })?;
    let encoded = match (payload.status.as_str(), &payload.polyline) {
        ("success", Some(encoded)) => encoded.clone(),
        _ => {
            let detail = payload.message.clone().unwrap_or_else(|| "unknown".into());
            return Err(Failure::new(FailureKind::Semantic, detail));
        }
    };
    let primary_path = polyline::decode(&encoded)
        .map_err(|err| Failure::new(FailureKind::Decode, err.to_string()))?;
    let primary = primary_candidate(&payload, encoded, criteria);
    let alternatives = payload
        .other_routes
        .iter()
        .map(|alternative| alternative_candidate(alternative, criteria))
        .collect();
    Ok(CalculatedRoute {
        result: RouteResult::new(primary, alternatives),
        primary_path,
    })
}

fn primary_candidate(payload: &RoutePayload, encoded: String, criteria: &str) -> RouteCandidate {
    let metrics = RouteMetrics::new(
        payload.distance.clone().unwrap_or_default(),
        payload.duration.clone().unwrap_or_default(),
        payload
            .optimization_used
            .clone()
            .unwrap_or_else(|| criteria.to_string()),
        payload.bonus_type.clone(),
        payload.bonus_value,
        payload.max_round_trips,
        payload.message.clone(),
    );
    RouteCandidate::new(
        0,
        encoded,
        payload.num_nodes.unwrap_or(0),
        metrics,
        payload.total_distance_km.unwrap_or(0.0) * 1000.0,
        true,
    )
}

fn alternative_candidate(payload: &AlternativePayload, criteria: &str) -> RouteCandidate {
    let metrics = RouteMetrics::new(
        payload.distance.clone(),
        payload.duration.clone(),
        criteria.to_string(),
        Some(payload.bonus_type.clone()),
        Some(payload.bonus_value),
        Some(payload.max_round_trips),
        None,
    );
    RouteCandidate::new(
        payload.route_index,
        payload.polyline.clone(),
        payload.num_nodes,
        metrics,
        payload.total_distance_meters,
        payload.is_feasible,
    )
}

#[wasm_bindgen]
/// Issues route calculations against the HTTP routing backend.
///
/// Holds the backend location and the optional signed-in identity; the
/// per-request state lives in the queries and outcomes passing through.
pub struct RouteClient {
    transport: FetchTransport,
    user: Option<String>,
}

#[wasm_bindgen]
impl RouteClient {
    #[wasm_bindgen(constructor)]
    /// Creates a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> RouteClient {
        RouteClient {
            transport: FetchTransport::new(base_url),
            user: None,
        }
    }

    #[wasm_bindgen(js_name = setUser)]
    /// Sets or clears the signed-in identity attached to requests.
    ///
    /// Without an identity requests go out unauthenticated, which the
    /// backend accepts.
    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    #[wasm_bindgen(js_name = setTimeoutMs)]
    /// Overrides the bounded wait applied to each request.
    pub fn set_timeout_ms(&mut self, timeout_ms: u32) {
        self.transport.set_timeout_ms(timeout_ms);
    }

    #[wasm_bindgen(js_name = requestRoute)]
    /// Executes the query. Never throws; every ending is folded into the
    /// returned outcome.
    pub async fn request_route(&self, query: &RouteQuery) -> RouteOutcome {
        calculate_route(&self.transport, self.user.as_deref(), query).await
    }
}
