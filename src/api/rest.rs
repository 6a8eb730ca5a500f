// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// JSON endpoints live under `/api/`. Every other path is served from the
// configured static directory (the dashboard front-end).
//
// CORS is fully permissive: the dashboard may be hosted on another origin.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::app_state::AppState;
use crate::error::IndicatorError;
use crate::indicators::{SqueezeIndicator, SqueezeParams};
use crate::types::{to_points, SqueezePoint};

// =============================================================================
// Router construction
// =============================================================================

/// Build the API router with static fallback, CORS middleware and state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/data", get(demo_data))
        .route("/api/squeeze", post(squeeze))
        .fallback_service(static_files)
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Errors
// =============================================================================

/// Indicator failures mapped onto HTTP responses.
pub struct ApiError(IndicatorError);

impl From<IndicatorError> for ApiError {
    fn from(err: IndicatorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            IndicatorError::InvalidInput(_) => {
                warn!(error = %self.0, "rejected squeeze request");
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": self.0.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

// =============================================================================
// Demo data
// =============================================================================

/// Indicator output over the built-in sample series.
async fn demo_data(State(state): State<Arc<AppState>>) -> Result<Json<Vec<SqueezePoint>>, ApiError> {
    let demo = &state.demo;
    let (values, squeeze_on) = state.indicator.calculate(&demo.close, &demo.high, &demo.low)?;
    debug!(bars = values.len(), "serving demo squeeze data");
    Ok(Json(to_points(&demo.close, &values, &squeeze_on)))
}

// =============================================================================
// Caller-supplied series
// =============================================================================

#[derive(Deserialize)]
struct SqueezeRequest {
    close: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    /// Per-request parameters; the configured ones apply when absent.
    #[serde(default)]
    params: Option<SqueezeParams>,
}

async fn squeeze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SqueezeRequest>,
) -> Result<Json<Vec<SqueezePoint>>, ApiError> {
    let custom;
    let indicator = match req.params {
        Some(params) => {
            custom = SqueezeIndicator::new(params)?;
            &custom
        }
        None => &state.indicator,
    };

    let (values, squeeze_on) = indicator.calculate(&req.close, &req.high, &req.low)?;
    debug!(bars = values.len(), "served squeeze request");
    Ok(Json(to_points(&req.close, &values, &squeeze_on)))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    use crate::runtime_config::RuntimeConfig;

    fn test_router() -> Router {
        let state = AppState::new(RuntimeConfig::default()).unwrap();
        router(Arc::new(state))
    }

    async fn json_body(resp: Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let resp = test_router()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn demo_data_has_one_row_per_bar() {
        let resp = test_router()
            .oneshot(Request::get("/api/data").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let rows = json_body(resp).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0]["time"], 0);
        assert_eq!(rows[0]["close"], 10.0);
        // Default windows are 20 bars long.
        assert_eq!(rows[18]["sqzOn"], false);
        assert_eq!(rows[18]["value"], 0.0);
        assert!(rows[24].get("sqzOn").unwrap().is_boolean());
    }

    #[tokio::test]
    async fn squeeze_with_custom_params() {
        let close: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let body = serde_json::json!({
            "close": close,
            "high": high,
            "low": low,
            "params": { "bb_length": 3, "kc_length": 3 }
        });

        let resp = test_router().oneshot(post_json("/api/squeeze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let rows = json_body(resp).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[1]["sqzOn"], false);
        assert_eq!(rows[2]["sqzOn"], true);
        assert_eq!(rows[9]["value"], 1.0);
    }

    #[tokio::test]
    async fn mismatched_lengths_are_bad_request() {
        let body = serde_json::json!({
            "close": [1.0, 2.0, 3.0],
            "high": [2.0, 3.0],
            "low": [0.0, 1.0, 2.0]
        });
        let resp = test_router().oneshot(post_json("/api/squeeze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err = json_body(resp).await;
        assert!(err["error"].as_str().unwrap().starts_with("invalid input"));
    }

    #[tokio::test]
    async fn invalid_params_are_bad_request() {
        let body = serde_json::json!({
            "close": [1.0],
            "high": [2.0],
            "low": [0.0],
            "params": { "kc_length": 0 }
        });
        let resp = test_router().oneshot(post_json("/api/squeeze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_series_is_empty_array() {
        let body = serde_json::json!({ "close": [], "high": [], "low": [] });
        let resp = test_router().oneshot(post_json("/api/squeeze", body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(json_body(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let req = Request::get("/api/health")
            .header(header::ORIGIN, "http://dashboard.local")
            .body(Body::empty())
            .unwrap();
        let resp = test_router().oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
