use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{AssessmentId, RiskCategory, ScoringOutcome};
use super::predictor::RemotePredictor;
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentError, AssessmentRequest, AssessmentService};

/// Router builder exposing scoring and history endpoints.
pub fn assessment_router<P, R>(service: Arc<AssessmentService<P, R>>) -> Router
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<P, R>))
        .route(
            "/api/v1/assessments",
            post(submit_handler::<P, R>).get(history_handler::<P, R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id",
            get(fetch_handler::<P, R>).delete(delete_handler::<P, R>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<P, R>))
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreResponse {
    #[serde(flatten)]
    pub(crate) outcome: ScoringOutcome,
    pub(crate) category: RiskCategory,
    pub(crate) recommendations: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardQuery {
    pub(crate) recorded_by: String,
}

fn error_response(error: AssessmentError) -> Response {
    match error {
        AssessmentError::Validation(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field().wire_name(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        AssessmentError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": "assessment not found" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        AssessmentError::NoHistory { .. } => {
            let payload = json!({ "error": "No predictions found for this user" });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        AssessmentError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": "assessment already exists" });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn score_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.score(&request.answers, request.use_remote).await {
        Ok(outcome) => {
            let category = outcome.category();
            let body = ScoreResponse {
                outcome,
                category,
                recommendations: category.recommendations(),
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.assess(request).await {
        Ok(receipt) => (StatusCode::CREATED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.history() {
        Ok(history) => (StatusCode::OK, axum::Json(history)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.delete(&AssessmentId(assessment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn dashboard_handler<P, R>(
    State(service): State<Arc<AssessmentService<P, R>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    P: RemotePredictor + 'static,
    R: AssessmentRepository + 'static,
{
    match service.summary(&query.recorded_by) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}
