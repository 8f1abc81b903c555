//! The job state machine and run protocol.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use jobrelay_core::{Error, Job, JobId, JobStatus, Result, TaskExecutor};
use jobrelay_db::JobStore;
use jobrelay_notifier::{NotificationResult, WebhookNotifier};

use crate::store_err;

/// What a successful run hands back: the final job record and the webhook
/// outcome, whether or not delivery succeeded.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub job: Job,
    pub webhook: NotificationResult,
}

/// Drives jobs through pending -> running -> completed/failed.
///
/// Runs for different ids proceed concurrently. For one id, the conditional
/// pending->running claim at the store guarantees at most one in-flight run.
pub struct LifecycleEngine {
    store: Arc<dyn JobStore>,
    executor: Arc<dyn TaskExecutor>,
    notifier: WebhookNotifier,
    execution_timeout: Duration,
}

impl LifecycleEngine {
    /// Bound on the task body of a single run.
    pub const DEFAULT_EXECUTION_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(
        store: Arc<dyn JobStore>,
        executor: Arc<dyn TaskExecutor>,
        notifier: WebhookNotifier,
    ) -> Self {
        Self {
            store,
            executor,
            notifier,
            execution_timeout: Self::DEFAULT_EXECUTION_TIMEOUT,
        }
    }

    pub fn with_execution_timeout(mut self, timeout: Duration) -> Self {
        self.execution_timeout = timeout;
        self
    }

    /// Run a pending job to completion and notify the webhook.
    ///
    /// Fails with `NotFound` for an unknown id and `InvalidState` for any
    /// job that is not pending. An executor error or timeout persists
    /// `failed` and surfaces `ExecutionFailed`. The webhook outcome never
    /// fails the run; it is recorded in `webhook_response` either way.
    pub async fn run(&self, id: JobId) -> Result<RunOutcome> {
        self.store.get(id).await.map_err(store_err)?;

        // Claim pending -> running. The store applies the precondition and
        // the write atomically, so a concurrent caller loses here rather
        // than double-running.
        let Some(job) = self.store.claim_pending(id).await.map_err(store_err)? else {
            let current = self.store.get(id).await.map_err(store_err)?;
            return Err(Error::InvalidState {
                id: id.to_string(),
                status: current.status,
            });
        };
        info!(job_id = %id, task = %job.task_name, "job started running");

        let execution =
            tokio::time::timeout(self.execution_timeout, self.executor.execute(&job.task_name, &job.payload))
                .await
                .map_err(|_| {
                    Error::ExecutionFailed(format!(
                        "task timed out after {:?}",
                        self.execution_timeout
                    ))
                })
                .and_then(|result| result);

        if let Err(err) = execution {
            error!(job_id = %id, error = %err, "job execution failed");
            self.store.mark_failed(id).await.map_err(store_err)?;
            return Err(Error::ExecutionFailed(err.to_string()));
        }

        let completed_at = Utc::now();
        self.store
            .mark_completed(id, completed_at)
            .await
            .map_err(store_err)?;
        info!(job_id = %id, "job completed");

        let document = json!({
            "jobId": job.id,
            "taskName": job.task_name,
            "priority": job.priority,
            "payload": job.payload,
            "completedAt": completed_at,
        });
        let webhook = self.notifier.notify(&document).await;

        // The outcome is persisted whether delivery succeeded or not; a
        // flaky webhook target never fails a completed job.
        let job = self
            .store
            .set_webhook_response(id, webhook.to_json())
            .await
            .map_err(store_err)?;

        Ok(RunOutcome { job, webhook })
    }
}
