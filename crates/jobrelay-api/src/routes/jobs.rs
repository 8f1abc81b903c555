//! Job submission and query endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::AppState;
use crate::error::ApiError;
use jobrelay_core::{Job, JobId, JobPriority, JobStatus};
use jobrelay_db::JobFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/{id}", get(get_job))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateJobRequest {
    #[serde(default)]
    task_name: Option<String>,
    #[serde(default)]
    payload: Option<Value>,
    #[serde(default)]
    priority: Option<JobPriority>,
}

async fn create_job(
    State(state): State<AppState>,
    body: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let Json(req) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let job = state
        .submission
        .submit(
            req.task_name.as_deref().unwrap_or(""),
            req.payload,
            req.priority.unwrap_or_default(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

#[derive(Debug, Deserialize)]
struct ListJobsQuery {
    status: Option<String>,
    priority: Option<String>,
}

/// `all` (or an omitted parameter) means no filter on that field.
fn parse_filter<T: std::str::FromStr<Err = String>>(
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match value {
        None | Some("all") | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(ApiError::BadRequest),
    }
}

async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListJobsQuery>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let filter = JobFilter {
        status: parse_filter::<JobStatus>(query.status.as_deref())?,
        priority: parse_filter::<JobPriority>(query.priority.as_deref())?,
    };
    let jobs = state.query.list(filter).await?;
    Ok(Json(jobs))
}

async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let id: JobId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid job id".to_string()))?;
    let job = state.query.get(id).await?;
    Ok(Json(job))
}
