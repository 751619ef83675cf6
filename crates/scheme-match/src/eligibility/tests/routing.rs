use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::eligibility::domain::DocumentStatus;
use crate::eligibility::router::{
    evaluate_handler, evaluate_scheme_handler, rank_handler, schemes_handler,
};
use crate::eligibility::{eligibility_router, EvaluationRequest, RankRequest};

fn request() -> EvaluationRequest {
    EvaluationRequest {
        profile: submission(),
        documents: DocumentStatus {
            aadhaar: true,
            ..DocumentStatus::default()
        },
        min_confidence: None,
    }
}

#[tokio::test]
async fn schemes_handler_lists_catalog() {
    let response = schemes_handler(State(service())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let schemes = payload
        .get("schemes")
        .and_then(serde_json::Value::as_array)
        .expect("schemes array");
    assert_eq!(schemes.len(), 2);
    assert_eq!(schemes[0].get("id"), Some(&json!("farmer-support")));
}

#[tokio::test]
async fn evaluate_handler_returns_sorted_results() {
    let response = evaluate_handler(State(service()), axum::Json(request())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let results = payload
        .get("results")
        .and_then(serde_json::Value::as_array)
        .expect("results array");
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].get("scheme_id"), Some(&json!("farmer-support")));
    assert_eq!(results[0].get("is_eligible"), Some(&json!(true)));
    assert_eq!(
        payload.pointer("/summary/eligible").and_then(serde_json::Value::as_u64),
        Some(1)
    );
}

#[tokio::test]
async fn evaluate_handler_filters_by_min_confidence() {
    let mut body = request();
    body.min_confidence = Some(100);

    let response = evaluate_handler(State(service()), axum::Json(body)).await;

    let payload = read_json_body(response).await;
    let results = payload
        .get("results")
        .and_then(serde_json::Value::as_array)
        .expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(
        payload
            .pointer("/summary/total_schemes")
            .and_then(serde_json::Value::as_u64),
        Some(2)
    );
}

#[tokio::test]
async fn evaluate_handler_rejects_invalid_profiles() {
    let mut body = request();
    body.profile.annual_income = -1.0;

    let response = evaluate_handler(State(service()), axum::Json(body)).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .contains("annual income"));
}

#[tokio::test]
async fn evaluate_scheme_handler_returns_not_found_for_unknown_scheme() {
    let response = evaluate_scheme_handler(
        State(service()),
        Path("missing".to_string()),
        axum::Json(request()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rank_handler_applies_min_score() {
    let response = rank_handler(
        State(service()),
        axum::Json(RankRequest {
            profile: submission(),
            min_score: 50,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ranked = payload
        .get("ranked")
        .and_then(serde_json::Value::as_array)
        .expect("ranked array");
    // farmer-support scores 89; widow-pension scores 47 and is filtered out
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].get("scheme_id"), Some(&json!("farmer-support")));
    assert_eq!(ranked[0].get("ranking_score"), Some(&json!(89)));
}

#[tokio::test]
async fn scheme_route_evaluates_single_scheme() {
    let router = eligibility_router(service());

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/eligibility/schemes/farmer-support")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&request()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("is_eligible"), Some(&json!(true)));
    assert_eq!(
        payload.pointer("/document_checklist/user_has/0"),
        Some(&json!("Aadhaar Card"))
    );
}

#[tokio::test]
async fn evaluate_route_accepts_minimal_payloads() {
    let router = eligibility_router(service());
    let body = json!({
        "profile": {
            "age": 55,
            "gender": "female",
            "occupation": "homemaker",
            "annual_income": 60000,
            "state": "Bihar",
            "category": "SC",
            "is_widow": true
        }
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/eligibility")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/results/0/scheme_id"),
        Some(&json!("widow-pension"))
    );
}
