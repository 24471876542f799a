use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::{SurveyId, SurveyRecord};
use super::repository::{RepositoryError, SurveyRepository};
use super::service::{ScoringServiceError, SustainabilityService};

/// Router exposing survey submission, index computation, and the results read-back.
pub fn survey_router<R>(service: Arc<SustainabilityService<R>>) -> Router
where
    R: SurveyRepository + 'static,
{
    Router::new()
        .route("/api/v1/surveys", post(submit_handler::<R>))
        .route(
            "/api/v1/surveys/:survey_id/indices",
            post(compute_handler::<R>).get(results_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
    axum::Json(record): axum::Json<SurveyRecord>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match service.submit(record) {
        Ok(stored) => (StatusCode::ACCEPTED, axum::Json(stored.status_view())).into_response(),
        Err(ScoringServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "survey already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn compute_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    match service.compute_indices(&id) {
        Ok(scores) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Err(ScoringServiceError::RecordNotFound(id)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn results_handler<R>(
    State(service): State<Arc<SustainabilityService<R>>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    match service.get(&id) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored.status_view())).into_response(),
        Err(ScoringServiceError::RecordNotFound(id)) => not_found(&id),
        Err(other) => internal_error(other),
    }
}

fn not_found(id: &SurveyId) -> Response {
    let payload = json!({
        "survey_id": id.0,
        "error": "survey not found",
    });
    (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
}

fn internal_error(error: ScoringServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
