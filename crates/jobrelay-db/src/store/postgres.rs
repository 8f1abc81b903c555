//! PostgreSQL job store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbError, DbResult};
use jobrelay_core::{Job, JobId};

use super::{JobFilter, JobStore, NewJob};

/// A row of the `jobs` relation. Status and priority are stored as text
/// and parsed into their enums at the boundary.
#[derive(Debug, sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    task_name: String,
    payload: Value,
    priority: String,
    status: String,
    webhook_response: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for Job {
    type Error = DbError;

    fn try_from(row: JobRow) -> DbResult<Job> {
        Ok(Job {
            id: JobId::from_uuid(row.id),
            task_name: row.task_name,
            payload: row.payload,
            priority: row.priority.parse().map_err(DbError::Decode)?,
            status: row.status.parse().map_err(DbError::Decode)?,
            webhook_response: row.webhook_response,
            created_at: row.created_at,
            updated_at: row.updated_at,
            completed_at: row.completed_at,
        })
    }
}

/// PostgreSQL implementation of `JobStore`.
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn insert(&self, new: NewJob) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (id, task_name, payload, priority, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&new.task_name)
        .bind(&new.payload)
        .bind(new.priority.as_str())
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn get(&self, id: JobId) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        row.try_into()
    }

    async fn list(&self, filter: JobFilter) -> DbResult<Vec<Job>> {
        // Ties on created_at fall back to id; v7 ids preserve insertion order.
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR priority = $2)
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.priority.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Job::try_from).collect()
    }

    async fn claim_pending(&self, id: JobId) -> DbResult<Option<Job>> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET status = 'running', updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Job::try_from).transpose()
    }

    async fn mark_completed(&self, id: JobId, completed_at: DateTime<Utc>) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET status = 'completed', completed_at = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id.as_uuid())
        .bind(completed_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        row.try_into()
    }

    async fn mark_failed(&self, id: JobId) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET status = 'failed', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        row.try_into()
    }

    async fn set_webhook_response(&self, id: JobId, response: Value) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET webhook_response = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id.as_uuid())
        .bind(response)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        row.try_into()
    }
}
