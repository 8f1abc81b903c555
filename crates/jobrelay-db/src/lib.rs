//! Job store for jobrelay.
//!
//! Provides the `JobStore` trait with a PostgreSQL implementation for
//! production and an in-memory implementation for tests and local runs.

pub mod error;
pub mod store;

pub use error::{DbError, DbResult};
pub use store::memory::MemoryJobStore;
pub use store::postgres::PgJobStore;
pub use store::{JobFilter, JobStore, NewJob};

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
