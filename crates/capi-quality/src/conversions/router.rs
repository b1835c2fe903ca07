use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};

use super::domain::{ConversionEvent, UserData};
use super::payload::{prepare_event_for_api, PreparedEvent};
use super::quality::{match_quality_report, MatchQualityReport};
use super::validation::{validate_event_parameters, ValidationReport};

/// HTTP endpoints exposing the engine to collaborators that are not linked
/// against this crate.
pub fn conversions_router() -> Router {
    Router::new()
        .route("/api/v1/conversions/validate", post(validate_handler))
        .route("/api/v1/conversions/prepare", post(prepare_handler))
        .route(
            "/api/v1/conversions/match-quality",
            post(match_quality_handler),
        )
}

pub(crate) async fn validate_handler(Json(event): Json<ConversionEvent>) -> Json<ValidationReport> {
    Json(validate_event_parameters(&event))
}

pub(crate) async fn prepare_handler(Json(event): Json<ConversionEvent>) -> impl IntoResponse {
    let prepared = PreparedEvent::from(prepare_event_for_api(&event));
    let status = if prepared.success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(prepared))
}

pub(crate) async fn match_quality_handler(
    Json(user_data): Json<UserData>,
) -> Json<MatchQualityReport> {
    Json(match_quality_report(&user_data))
}
