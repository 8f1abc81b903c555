//! Job store trait and implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::DbResult;
use jobrelay_core::{Job, JobId, JobPriority, JobStatus};

/// Fields needed to create a job. Everything else is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub task_name: String,
    pub payload: Value,
    pub priority: JobPriority,
}

/// Exact-match filter for listing jobs. `None` fields pass everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobFilter {
    pub status: Option<JobStatus>,
    pub priority: Option<JobPriority>,
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job with status pending.
    async fn insert(&self, new: NewJob) -> DbResult<Job>;

    /// Fetch a job by id.
    async fn get(&self, id: JobId) -> DbResult<Job>;

    /// List jobs matching the filter, newest first.
    async fn list(&self, filter: JobFilter) -> DbResult<Vec<Job>>;

    /// Atomically move a pending job to running.
    ///
    /// Returns the updated job if the conditional update took effect, or
    /// `None` if the job is absent or not pending. The precondition check
    /// and the write are a single store-level operation, so exactly one of
    /// any number of concurrent callers can win.
    async fn claim_pending(&self, id: JobId) -> DbResult<Option<Job>>;

    /// Mark a running job completed, stamping `completed_at`.
    async fn mark_completed(&self, id: JobId, completed_at: DateTime<Utc>) -> DbResult<Job>;

    /// Mark a job failed.
    async fn mark_failed(&self, id: JobId) -> DbResult<Job>;

    /// Record the webhook notification outcome.
    async fn set_webhook_response(&self, id: JobId, response: Value) -> DbResult<Job>;
}
