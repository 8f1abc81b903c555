//! Executor trait and the simulated reference executor.
//!
//! Executors run the task body of a job. The engine treats execution as a
//! pluggable strategy bound to the task name and payload.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::Result;

/// Executes the body of a task.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Run the task to completion. An `Err` marks the job failed.
    async fn execute(&self, task_name: &str, payload: &Value) -> Result<()>;
}

/// Reference executor: sleeps for a fixed duration and succeeds.
///
/// Stands in for real task execution; the delay models processing time.
pub struct SimulatedExecutor {
    delay: Duration,
}

impl SimulatedExecutor {
    /// Default processing delay.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

#[async_trait]
impl TaskExecutor for SimulatedExecutor {
    async fn execute(&self, _task_name: &str, _payload: &Value) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
