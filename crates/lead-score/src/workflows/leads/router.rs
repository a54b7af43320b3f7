use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::LeadRecord;
use super::service::{LeadScoringService, LeadServiceError};

#[derive(Debug, Deserialize)]
pub struct CalibrateRequest {
    pub csv: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub fields: BTreeMap<String, Option<String>>,
}

/// Router exposing calibration, scoring, and diagnostic tables.
pub fn lead_router(service: Arc<LeadScoringService>) -> Router {
    Router::new()
        .route("/api/v1/leads/calibrate", post(calibrate_handler))
        .route("/api/v1/leads/calibration", get(calibration_handler))
        .route("/api/v1/leads/score", post(score_handler))
        .route("/api/v1/leads/tables", get(tables_handler))
        .with_state(service)
}

pub(crate) async fn calibrate_handler(
    State(service): State<Arc<LeadScoringService>>,
    Json(request): Json<CalibrateRequest>,
) -> Response {
    match service.calibrate_csv(&request.csv) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn calibration_handler(
    State(service): State<Arc<LeadScoringService>>,
) -> Response {
    match service.summary() {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn score_handler(
    State(service): State<Arc<LeadScoringService>>,
    Json(request): Json<ScoreRequest>,
) -> Response {
    let record = LeadRecord::from_fields(request.fields);
    match service.score(&record) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tables_handler(State(service): State<Arc<LeadScoringService>>) -> Response {
    match service.tables() {
        Ok(tables) => (StatusCode::OK, Json(tables)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LeadServiceError) -> Response {
    let (status, kind) = match &error {
        LeadServiceError::NotCalibrated => (StatusCode::CONFLICT, "not_calibrated"),
        LeadServiceError::Scoring(inner) => (StatusCode::UNPROCESSABLE_ENTITY, inner.kind()),
        LeadServiceError::Import(_) => (StatusCode::BAD_REQUEST, "invalid_csv"),
    };

    let payload = json!({
        "error": error.to_string(),
        "kind": kind,
    });
    (status, Json(payload)).into_response()
}
