//! HTTP routes and handlers

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clusterd_core::FeatureVector;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/model", get(model_info))
        .route("/predict", post(predict))
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    state.metrics_handle.render()
}

/// Prediction request body
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

/// Prediction response body
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub cluster: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub version: String,
    pub n_clusters: usize,
    pub n_features: usize,
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    let model = &state.model;
    Json(ModelInfo {
        name: model.name().to_string(),
        version: model.version().to_string(),
        n_clusters: model.n_clusters(),
        n_features: model.n_features(),
    })
}

/// Assign a feature vector to its nearest centroid
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    metrics::counter!("clusterd_requests_total").increment(1);
    let start = Instant::now();

    let Json(req) = payload.map_err(|rejection| {
        metrics::counter!("clusterd_errors_total", "kind" => "malformed_body").increment(1);
        AppError::InvalidRequest(rejection.body_text())
    })?;

    let features = FeatureVector::new(req.features).map_err(|e| state.error(e))?;
    debug!("Predicting for {} features", features.len());

    let label = state.model.assign(&features).map_err(|e| state.error(e))?;

    metrics::counter!("clusterd_predictions_total", "cluster" => label.to_string()).increment(1);
    metrics::histogram!("clusterd_predict_latency_us").record(start.elapsed().as_micros() as f64);

    Ok(Json(PredictResponse {
        cluster: label.index(),
    }))
}

async fn fallback() -> Response {
    AppError::NotFound.into_response()
}

impl AppState {
    /// Classify a model error into a response, honoring debug mode
    fn error(&self, err: clusterd_core::Error) -> AppError {
        metrics::counter!("clusterd_errors_total", "kind" => err.kind()).increment(1);

        if err.is_client_error() {
            warn!("Rejected request: {}", err);
            AppError::InvalidRequest(err.to_string())
        } else {
            error!("Prediction failed: {}", err);
            let message = if self.config.debug {
                err.to_string()
            } else {
                "prediction failed".to_string()
            };
            AppError::Internal(message)
        }
    }
}

/// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            AppError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = json!({
            "error": {
                "message": self.to_string(),
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
