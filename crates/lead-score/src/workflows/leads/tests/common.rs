use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::workflows::leads::{LeadRecord, RecordSet, ScoringConfig};

pub(super) const CLOSED: &str = "Closed Deal-No Further Action";
pub(super) const CONTRACT: &str = "Seller Contract Received-Deal For Sale";
pub(super) const DEAD: &str = "Dead Lead-Not Interested";
pub(super) const OUTCOME: &str = "DEAL STATUS";

pub(super) fn lead(size: Option<&str>, status: Option<&str>) -> LeadRecord {
    LeadRecord::from_fields([("Size", size), (OUTCOME, status)])
}

/// Ten closed small leads and ten dead large leads.
pub(super) fn size_records() -> RecordSet {
    let mut records = Vec::new();
    for _ in 0..10 {
        records.push(lead(Some("Small"), Some(CLOSED)));
        records.push(lead(Some("Large"), Some(DEAD)));
    }
    RecordSet::new(["Size", OUTCOME], OUTCOME, records)
}

pub(super) fn size_config() -> ScoringConfig {
    ScoringConfig {
        attributes: vec!["Size".to_string()],
        ..ScoringConfig::default()
    }
}

pub(super) fn acquisition_records() -> RecordSet {
    let rows = [
        (Some("High Equity"), Some("Vacant"), Some(CONTRACT)),
        (Some("High Equity"), Some("Vacant"), Some(CLOSED)),
        (Some("High Equity"), Some("Owner Occupied"), Some(DEAD)),
        (Some("Medium Equity"), Some("Tenant Occupied"), Some(CLOSED)),
        (Some("Medium Equity"), None, Some(DEAD)),
        (Some("Low/No Equity"), Some("Owner Occupied"), Some(DEAD)),
        (Some("Low/No Equity"), Some("Tenant Occupied"), Some(DEAD)),
        (None, Some("Vacant"), Some(CLOSED)),
        (Some("Low/No Equity"), Some("Vacant"), None),
    ];

    let records = rows
        .iter()
        .map(|(equity, occupancy, status)| {
            LeadRecord::from_fields([
                ("Equity", *equity),
                ("Occupancy", *occupancy),
                (OUTCOME, *status),
            ])
        })
        .collect();

    RecordSet::new(["Equity", "Occupancy", OUTCOME], OUTCOME, records)
}

pub(super) fn acquisition_config() -> ScoringConfig {
    ScoringConfig {
        attributes: vec!["Equity".to_string(), "Occupancy".to_string()],
        ..ScoringConfig::default()
    }
}

pub(super) fn acquisition_csv() -> String {
    "Equity,Occupancy,DEAL STATUS\n\
High Equity,Vacant,Seller Contract Received-Deal For Sale\n\
High Equity,Vacant,Closed Deal-No Further Action\n\
High Equity,Owner Occupied,Dead Lead-Not Interested\n\
Medium Equity,Tenant Occupied,Closed Deal-No Further Action\n\
Medium Equity,,Dead Lead-Not Interested\n\
Low/No Equity,Owner Occupied,Dead Lead-Not Interested\n\
Low/No Equity,Tenant Occupied,Dead Lead-Not Interested\n\
,Vacant,Closed Deal-No Further Action\n\
Low/No Equity,Vacant,\n"
        .to_string()
}

pub(super) fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) fn empty_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
