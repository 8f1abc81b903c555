//! In-memory job store.
//!
//! Backs tests and local runs that have no Postgres at hand. Mirrors the
//! conditional-update semantics of the SQL store: the pending check and the
//! running write happen under one lock acquisition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Mutex;

use crate::{DbError, DbResult};
use jobrelay_core::{Job, JobId, JobStatus};

use super::{JobFilter, JobStore, NewJob};

#[derive(Default)]
pub struct MemoryJobStore {
    // Insertion order is preserved; list() sorts stably on created_at.
    jobs: Mutex<Vec<Job>>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_job<T>(&self, id: JobId, f: impl FnOnce(&mut Job) -> T) -> DbResult<T> {
        let mut jobs = self.jobs.lock().unwrap();
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        Ok(f(job))
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn insert(&self, new: NewJob) -> DbResult<Job> {
        let now = Utc::now();
        let job = Job {
            id: JobId::new(),
            task_name: new.task_name,
            payload: new.payload,
            priority: new.priority,
            status: JobStatus::Pending,
            webhook_response: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        self.jobs.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn get(&self, id: JobId) -> DbResult<Job> {
        self.with_job(id, |job| job.clone())
    }

    async fn list(&self, filter: JobFilter) -> DbResult<Vec<Job>> {
        let jobs = self.jobs.lock().unwrap();
        let mut matching: Vec<Job> = jobs
            .iter()
            .filter(|j| filter.status.is_none_or(|s| j.status == s))
            .filter(|j| filter.priority.is_none_or(|p| j.priority == p))
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn claim_pending(&self, id: JobId) -> DbResult<Option<Job>> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs.iter_mut().find(|j| j.id == id) else {
            return Ok(None);
        };
        if job.status != JobStatus::Pending {
            return Ok(None);
        }
        job.status = JobStatus::Running;
        job.updated_at = Utc::now();
        Ok(Some(job.clone()))
    }

    async fn mark_completed(&self, id: JobId, completed_at: DateTime<Utc>) -> DbResult<Job> {
        self.with_job(id, |job| {
            job.status = JobStatus::Completed;
            job.completed_at = Some(completed_at);
            job.updated_at = Utc::now();
            job.clone()
        })
    }

    async fn mark_failed(&self, id: JobId) -> DbResult<Job> {
        self.with_job(id, |job| {
            job.status = JobStatus::Failed;
            job.updated_at = Utc::now();
            job.clone()
        })
    }

    async fn set_webhook_response(&self, id: JobId, response: Value) -> DbResult<Job> {
        self.with_job(id, |job| {
            job.webhook_response = Some(response);
            job.updated_at = Utc::now();
            job.clone()
        })
    }
}
