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
use tracing::warn;

use super::domain::{AllocationRequest, NewPosting, PostingId, StudentProfile};
use super::evaluation::ScoredMatch;
use super::repository::{AllocationRepository, PostingRepository, RepositoryError};
use super::service::{MatchService, MatchServiceError};

/// Body accepted by the match endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub student_profile: Option<StudentProfile>,
    #[serde(default)]
    pub top_n: Option<i64>,
}

/// Ranked matches returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub matches: Vec<ScoredMatch>,
}

/// Router builder exposing matching, posting, and allocation endpoints.
pub fn matching_router<P, A>(service: Arc<MatchService<P, A>>) -> Router
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    Router::new()
        .route("/api/match", post(match_handler::<P, A>))
        .route(
            "/api/internships",
            get(list_postings_handler::<P, A>).post(create_posting_handler::<P, A>),
        )
        .route(
            "/api/internships/:internship_id",
            get(posting_handler::<P, A>),
        )
        .route(
            "/api/internships/:internship_id/allocations",
            get(allocations_handler::<P, A>),
        )
        .route("/api/allocations", post(allocate_handler::<P, A>))
        .with_state(service)
}

pub(crate) async fn match_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.match_student(request.student_profile.as_ref(), request.top_n) {
        Ok(matches) => (StatusCode::OK, axum::Json(MatchResponse { matches })).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_postings_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.list_postings() {
        Ok(postings) => (StatusCode::OK, axum::Json(postings)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_posting_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
    axum::Json(posting): axum::Json<NewPosting>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.create_posting(posting) {
        Ok(posting) => (StatusCode::CREATED, axum::Json(posting)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn posting_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.get_posting(&PostingId(internship_id)) {
        Ok(posting) => (StatusCode::OK, axum::Json(posting)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn allocations_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
    Path(internship_id): Path<String>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.allocations_for(&PostingId(internship_id)) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn allocate_handler<P, A>(
    State(service): State<Arc<MatchService<P, A>>>,
    axum::Json(request): axum::Json<AllocationRequest>,
) -> Response
where
    P: PostingRepository + 'static,
    A: AllocationRepository + 'static,
{
    match service.allocate(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match &error {
        MatchServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        MatchServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        MatchServiceError::Repository(RepositoryError::Unavailable(_))
        | MatchServiceError::Poisoned => {
            warn!(%error, "matching request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
