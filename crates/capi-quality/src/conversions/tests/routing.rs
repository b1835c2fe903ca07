use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::conversions::router::conversions_router;

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds");

    let response = conversions_router()
        .oneshot(request)
        .await
        .expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}

fn purchase_document() -> Value {
    json!({
        "eventName": "Purchase",
        "eventTime": 1_727_179_200u64,
        "actionSource": "website",
        "eventId": "order-123",
        "userData": { "em": ["hash_email"], "fbp": "fb.1.1727179200.123" },
        "customData": { "value": 47.9, "currency": "BRL" }
    })
}

#[tokio::test]
async fn validate_endpoint_reports_issues() {
    let (status, body) = post_json(
        "/api/v1/conversions/validate",
        json!({ "eventName": "Lead", "userData": { "fn": ["john"], "ge": ["m"] } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_valid"], json!(false));
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 4);
    assert!(errors
        .iter()
        .any(|error| error.as_str().is_some_and(|text| text.contains("fn + ge"))));
}

#[tokio::test]
async fn prepare_endpoint_returns_payload() {
    let (status, body) = post_json("/api/v1/conversions/prepare", purchase_document()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["payload"]["data"][0]["event_id"], json!("order-123"));
    assert_eq!(
        body["payload"]["data"][0]["custom_data"]["currency"],
        json!("BRL")
    );
}

#[tokio::test]
async fn prepare_endpoint_rejects_invalid_event() {
    let (status, body) = post_json("/api/v1/conversions/prepare", json!({})).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert!(body.get("payload").is_none());
    assert!(!body["errors"].as_array().expect("errors array").is_empty());
}

#[tokio::test]
async fn match_quality_endpoint_scores_user_data() {
    let (status, body) = post_json(
        "/api/v1/conversions/match-quality",
        json!({ "em": ["hash_email"], "ph": ["hash_phone"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], json!(55));
    assert_eq!(body["components"][1]["signal"], json!("phone"));
    assert_eq!(body["recommendations"].as_array().map(Vec::len), Some(5));
}
