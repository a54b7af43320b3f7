use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::leads::{lead_router, LeadScoringService};

fn service() -> Arc<LeadScoringService> {
    Arc::new(LeadScoringService::new(acquisition_config()))
}

#[tokio::test]
async fn scoring_before_calibration_conflicts() {
    let router = lead_router(service());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/score",
            json!({ "fields": { "Equity": "High Equity" } }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "not_calibrated");
}

#[tokio::test]
async fn calibrate_then_score_round_trip() {
    let service = service();

    let response = lead_router(service.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/calibrate",
            json!({ "csv": acquisition_csv() }),
        ))
        .await
        .expect("router responds");
    let (status, summary) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["record_count"], 9);
    assert_eq!(summary["convention"], "span200");
    assert_eq!(summary["attributes"], json!(["Equity", "Occupancy"]));

    let response = lead_router(service.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/score",
            json!({ "fields": { "Equity": "High Equity", "Occupancy": null } }),
        ))
        .await
        .expect("router responds");
    let (status, score) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["score"], 36);
    assert_eq!(score["likelihood"], "relatively_likely");
    assert_eq!(score["likelihood_label"], "relatively likely");
    assert_eq!(score["components"][1]["imputed"], true);
}

#[tokio::test]
async fn unknown_category_is_unprocessable() {
    let service = service();
    service
        .calibrate_csv(&acquisition_csv())
        .expect("calibrates");

    let response = lead_router(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/score",
            json!({ "fields": { "Equity": "Negative Equity", "Occupancy": "Vacant" } }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "unknown_category");
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("Negative Equity"));
}

#[tokio::test]
async fn calibrating_without_outcome_column_is_unprocessable() {
    let response = lead_router(service())
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/calibrate",
            json!({ "csv": "Equity,Occupancy\nHigh Equity,Vacant\n" }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "missing_outcome_column");
}

#[tokio::test]
async fn tables_endpoint_lists_each_attribute() {
    let service = service();
    service
        .calibrate_csv(&acquisition_csv())
        .expect("calibrates");

    let response = lead_router(service)
        .oneshot(empty_request("/api/v1/leads/tables"))
        .await
        .expect("router responds");

    let (status, tables) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tables[0]["attribute"], "Equity");
    assert_eq!(tables[0]["counts"]["rows"][0]["value"], "High Equity");
    assert_eq!(tables[0]["counts"]["rows"][0]["closed"], 2);
    assert_eq!(tables[1]["weights"]["rows"][0]["weight"], 175.0);
}

#[tokio::test]
async fn duplicate_export_columns_are_a_bad_request() {
    let response = lead_router(service())
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/calibrate",
            json!({ "csv": format!("Equity,Equity ,{OUTCOME}\nHigh Equity,Low/No Equity,{CLOSED}\n") }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_csv");
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("'Equity'"));
}

#[tokio::test]
async fn zero_width_values_score_like_the_export_that_calibrated_them() {
    let service = Arc::new(LeadScoringService::new(size_config()));
    service
        .calibrate_csv(&format!(
            "Size,{OUTCOME}\n\u{200b}Small,{CLOSED}\nLarge,{DEAD}\n"
        ))
        .expect("calibrates");

    let response = lead_router(service)
        .oneshot(json_request(
            "POST",
            "/api/v1/leads/score",
            json!({ "fields": { "Size": "\u{200b}Small" } }),
        ))
        .await
        .expect("router responds");

    let (status, score) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(score["score"], 100);
    assert_eq!(score["components"][0]["value"], "Small");
}
