use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{DocumentStatus, SchemeId};
use super::intake::ProfileSubmission;
use super::service::{EligibilityService, EligibilityServiceError};

/// Body accepted by the evaluation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub profile: ProfileSubmission,
    #[serde(default)]
    pub documents: DocumentStatus,
    #[serde(default)]
    pub min_confidence: Option<u8>,
}

/// Body accepted by the ranking endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRequest {
    pub profile: ProfileSubmission,
    #[serde(default)]
    pub min_score: u8,
}

/// Router exposing catalog listing, evaluation and ranking endpoints.
pub fn eligibility_router(service: Arc<EligibilityService>) -> Router {
    Router::new()
        .route("/api/v1/schemes", get(schemes_handler))
        .route("/api/v1/eligibility", post(evaluate_handler))
        .route("/api/v1/eligibility/rank", post(rank_handler))
        .route(
            "/api/v1/eligibility/schemes/:scheme_id",
            post(evaluate_scheme_handler),
        )
        .with_state(service)
}

pub(crate) async fn schemes_handler(State(service): State<Arc<EligibilityService>>) -> Response {
    let schemes = service.schemes();
    (StatusCode::OK, axum::Json(json!({ "schemes": schemes }))).into_response()
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    let EvaluationRequest {
        profile,
        documents,
        min_confidence,
    } = request;

    match service.evaluate_all(profile, documents) {
        Ok(report) => {
            let report = match min_confidence {
                Some(min) => report.retain_confident(min),
                None => report,
            };
            (StatusCode::OK, axum::Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_scheme_handler(
    State(service): State<Arc<EligibilityService>>,
    Path(scheme_id): Path<String>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    let scheme_id = SchemeId(scheme_id);
    match service.evaluate_scheme(&scheme_id, request.profile, request.documents) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rank_handler(
    State(service): State<Arc<EligibilityService>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response {
    match service.rank(request.profile, request.min_score) {
        Ok(ranked) => (StatusCode::OK, axum::Json(json!({ "ranked": ranked }))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EligibilityServiceError) -> Response {
    let status = match &error {
        EligibilityServiceError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EligibilityServiceError::UnknownScheme(_) => StatusCode::NOT_FOUND,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
