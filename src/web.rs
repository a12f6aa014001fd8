//! HTTP surface for the prediction service.

use crate::app_state::AppState;
use crate::errors::SieveError;
use crate::keywords::KeywordHit;
use crate::service::PredictionResult;
use axum::{
    extract::Extension,
    response::Html,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: String,
    /// Confidence as a percentage string, e.g. "97.25%".
    pub probability: String,
    pub keywords: Vec<KeywordHit>,
}

impl From<PredictionResult> for PredictResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            prediction: result.label.to_string(),
            probability: format!("{:.2}%", result.confidence * 100.0),
            keywords: result.keywords,
        }
    }
}

/// Build the full application router with tracing, timeout, and CORS
/// layers applied.
pub fn build_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        // versioned alias
        .route("/v1/predict", post(predict))
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

#[axum::debug_handler]
async fn predict(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, SieveError> {
    let message = req.message.as_deref().unwrap_or("");
    let result = state.service.predict(message)?;
    Ok(Json(result.into()))
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[axum::debug_handler]
async fn readyz(Extension(state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ready": state.service.ready() }))
}
