//! Wire format spoken with the routing backend.

use serde::{Deserialize, Serialize};

/// Body of the `POST /maps/calculate-route` request.
#[derive(Serialize, Debug)]
pub struct CalculateRouteBody {
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub optimization_criteria: String,
    pub mode: &'static str,
}

/// Top-level calculation payload.
#[derive(Deserialize, Debug)]
pub struct RoutePayload {
    pub status: String,
    pub polyline: Option<String>,
    pub distance: Option<String>,
    pub duration: Option<String>,
    pub optimization_used: Option<String>,
    pub bonus_type: Option<String>,
    pub bonus_value: Option<f64>,
    pub max_round_trips: Option<u32>,
    pub num_nodes: Option<u32>,
    pub total_distance_km: Option<f64>,
    pub message: Option<String>,
    #[serde(default)]
    pub other_routes: Vec<AlternativePayload>,
}

/// One ranked alternative inside the calculation payload.
#[derive(Deserialize, Debug)]
pub struct AlternativePayload {
    pub route_index: u32,
    pub polyline: String,
    pub num_nodes: u32,
    pub bonus_type: String,
    pub bonus_value: f64,
    pub total_distance_meters: f64,
    pub total_distance_km: f64,
    pub is_feasible: bool,
    pub max_round_trips: u32,
    pub distance: String,
    pub duration: String,
}

/// Error body attached to non-2xx replies.
#[derive(Deserialize, Debug)]
pub struct ErrorPayload {
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let payload: RoutePayload = serde_json::from_str(
            r#"{
                "status": "success",
                "polyline": "_p~iF~ps|U",
                "distance": "15.2 km",
                "duration": "25 mins",
                "optimization_used": "fastest",
                "route_id": 17,
                "bonus_type": "Type A",
                "bonus_value": 5,
                "max_round_trips": 3,
                "num_nodes": 4,
                "total_distance_km": 15.2,
                "message": "Optimal route selected",
                "other_routes": [{
                    "route_index": 1,
                    "polyline": "_ulLnnqC",
                    "num_nodes": 2,
                    "bonus_type": "None",
                    "bonus_value": 0,
                    "total_distance_meters": 16750.0,
                    "total_distance_km": 16.75,
                    "is_feasible": false,
                    "max_round_trips": 0,
                    "distance": "16.75 km",
                    "duration": "31 mins"
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(payload.status, "success");
        assert_eq!(payload.polyline.as_deref(), Some("_p~iF~ps|U"));
        assert_eq!(payload.bonus_value, Some(5.0));
        assert_eq!(payload.other_routes.len(), 1);
        let alternative = &payload.other_routes[0];
        assert_eq!(alternative.route_index, 1);
        assert!(!alternative.is_feasible);
    }

    #[test]
    fn missing_other_routes_defaults_to_empty() {
        let payload: RoutePayload =
            serde_json::from_str(r#"{"status": "error", "message": "No route found"}"#).unwrap();
        assert_eq!(payload.status, "error");
        assert!(payload.other_routes.is_empty());
        assert_eq!(payload.message.as_deref(), Some("No route found"));
    }

    #[test]
    fn request_body_shape() {
        let body = CalculateRouteBody {
            start_lat: 12.97,
            start_lng: 77.59,
            end_lat: 12.98,
            end_lng: 77.60,
            optimization_criteria: "fastest".to_string(),
            mode: "driving",
        };
        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(json["start_lat"], 12.97);
        assert_eq!(json["mode"], "driving");
        assert_eq!(json["optimization_criteria"], "fastest");
    }
}
