//! Read path over the job store.

use std::sync::Arc;

use jobrelay_core::{Job, JobId, Result};
use jobrelay_db::{JobFilter, JobStore};

use crate::store_err;

/// Lists and fetches jobs. Lock-free with respect to in-flight runs; every
/// read sees the latest persisted transition.
pub struct QueryService {
    store: Arc<dyn JobStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Jobs matching the filter, newest first.
    pub async fn list(&self, filter: JobFilter) -> Result<Vec<Job>> {
        self.store.list(filter).await.map_err(store_err)
    }

    pub async fn get(&self, id: JobId) -> Result<Job> {
        self.store.get(id).await.map_err(store_err)
    }
}
