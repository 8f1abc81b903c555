//! Job submission: validation plus one store write.

use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

use jobrelay_core::{Error, Job, JobPriority, Result};
use jobrelay_db::{JobStore, NewJob};

use crate::store_err;

/// Validates and creates new jobs.
pub struct SubmissionService {
    store: Arc<dyn JobStore>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Create a pending job.
    ///
    /// The task name must contain something other than whitespace. The
    /// payload, when given, must be a JSON object; omitted means `{}`.
    pub async fn submit(
        &self,
        task_name: &str,
        payload: Option<Value>,
        priority: JobPriority,
    ) -> Result<Job> {
        if task_name.trim().is_empty() {
            return Err(Error::InvalidInput("taskName is required".to_string()));
        }

        let payload = match payload {
            None | Some(Value::Null) => json!({}),
            Some(value @ Value::Object(_)) => value,
            Some(_) => {
                return Err(Error::InvalidInput(
                    "payload must be a JSON object".to_string(),
                ));
            }
        };

        let job = self
            .store
            .insert(NewJob {
                task_name: task_name.to_string(),
                payload,
                priority,
            })
            .await
            .map_err(store_err)?;

        info!(job_id = %job.id, task = %job.task_name, priority = %job.priority, "job submitted");
        Ok(job)
    }
}
