//! Run endpoint: drive a pending job through its lifecycle.

use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::AppState;
use crate::error::ApiError;
use jobrelay_core::{Job, JobId};

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", post(run_job))
}

#[derive(Debug, Serialize)]
struct RunJobResponse {
    message: &'static str,
    job: Job,
    #[serde(rename = "webhookResponse")]
    webhook_response: Value,
}

async fn run_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RunJobResponse>, ApiError> {
    let id: JobId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("invalid job id".to_string()))?;

    let outcome = state.engine.run(id).await?;
    Ok(Json(RunJobResponse {
        message: "Job completed successfully",
        job: outcome.job,
        webhook_response: outcome.webhook.to_json(),
    }))
}
