use crate::infra::AppState;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};
use chrono::Utc;
use farm_sustainability::survey::{
    survey_router, DraftError, DraftStore, RepositoryError, ScoringServiceError, SurveyId,
    SurveyRepository, SurveyStep, SustainabilityService,
};
use serde_json::json;
use std::sync::Arc;

/// Shared state for the survey wizard endpoints.
pub(crate) struct WizardState<R> {
    service: Arc<SustainabilityService<R>>,
    drafts: Arc<DraftStore>,
}

impl<R> Clone for WizardState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            drafts: self.drafts.clone(),
        }
    }
}

pub(crate) fn with_survey_routes<R>(
    service: Arc<SustainabilityService<R>>,
    drafts: Arc<DraftStore>,
) -> Router
where
    R: SurveyRepository + 'static,
{
    let wizard = Router::new()
        .route("/api/v1/drafts", post(start_draft::<R>))
        .route("/api/v1/drafts/:survey_id", get(draft_status::<R>))
        .route("/api/v1/drafts/:survey_id/steps", put(save_step::<R>))
        .route("/api/v1/drafts/:survey_id/submit", post(submit_draft::<R>))
        .with_state(WizardState {
            service: service.clone(),
            drafts,
        });

    survey_router(service)
        .merge(wizard)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    if ready {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn start_draft<R>(State(state): State<WizardState<R>>) -> Response
where
    R: SurveyRepository + 'static,
{
    let survey_id = state.drafts.start(Utc::now());
    let payload = json!({ "survey_id": survey_id });
    (StatusCode::CREATED, Json(payload)).into_response()
}

async fn draft_status<R>(
    State(state): State<WizardState<R>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    match state.drafts.get(&SurveyId(survey_id)) {
        Ok(session) => {
            let payload = json!({
                "survey_id": session.survey_id,
                "missing": session.missing_sections(),
                "record": session.record,
                "updated_at": session.updated_at,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => draft_error(error),
    }
}

async fn save_step<R>(
    State(state): State<WizardState<R>>,
    Path(survey_id): Path<String>,
    Json(step): Json<SurveyStep>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    let saved = state
        .drafts
        .save_step(&id, step, Utc::now())
        .and_then(|()| state.drafts.missing_steps(&id));
    match saved {
        Ok(missing) => {
            let payload = json!({ "survey_id": id, "missing": missing });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => draft_error(error),
    }
}

async fn submit_draft<R>(
    State(state): State<WizardState<R>>,
    Path(survey_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
{
    let id = SurveyId(survey_id);
    match state.service.submit_draft(&state.drafts, &id) {
        Ok(scores) => (StatusCode::OK, Json(scores)).into_response(),
        Err(ScoringServiceError::Draft(error)) => draft_error(error),
        Err(ScoringServiceError::Repository(RepositoryError::Conflict)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "survey already exists" })),
        )
            .into_response(),
        Err(other) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

fn draft_error(error: DraftError) -> Response {
    match error {
        DraftError::UnknownSession(id) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "survey_id": id, "error": "draft not found" })),
        )
            .into_response(),
    }
}
