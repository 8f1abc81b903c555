//! Application state.

use std::sync::Arc;

use jobrelay_core::TaskExecutor;
use jobrelay_db::JobStore;
use jobrelay_engine::{LifecycleEngine, QueryService, SubmissionService};
use jobrelay_notifier::WebhookNotifier;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub submission: Arc<SubmissionService>,
    pub query: Arc<QueryService>,
    pub engine: Arc<LifecycleEngine>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn JobStore>,
        executor: Arc<dyn TaskExecutor>,
        notifier: WebhookNotifier,
    ) -> Self {
        Self {
            submission: Arc::new(SubmissionService::new(store.clone())),
            query: Arc::new(QueryService::new(store.clone())),
            engine: Arc::new(LifecycleEngine::new(store, executor, notifier)),
        }
    }
}
