//! Job lifecycle engine for jobrelay.
//!
//! Three services over the job store: submission (validate and create),
//! query (list/filter/get), and the lifecycle engine that drives
//! pending -> running -> completed/failed and delivers the webhook.

pub mod lifecycle;
pub mod query;
pub mod submit;

pub use lifecycle::{LifecycleEngine, RunOutcome};
pub use query::QueryService;
pub use submit::SubmissionService;

use jobrelay_core::Error;
use jobrelay_db::DbError;

/// Store errors cross into the domain taxonomy here. Detail is logged;
/// callers see a generic store failure unless the job was simply absent.
pub(crate) fn store_err(err: DbError) -> Error {
    match err {
        DbError::NotFound(what) => Error::NotFound(what),
        other => {
            tracing::error!(error = %other, "job store operation failed");
            Error::Store("job store operation failed".to_string())
        }
    }
}
