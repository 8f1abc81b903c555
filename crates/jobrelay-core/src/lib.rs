//! Core domain types and traits for the jobrelay job queue.
//!
//! This crate contains:
//! - Job identifiers and the job record
//! - Status and priority enums with the lifecycle rules
//! - Executor trait and the simulated reference executor
//! - The shared error taxonomy

pub mod error;
pub mod executor;
pub mod id;
pub mod job;

pub use error::{Error, Result};
pub use executor::{SimulatedExecutor, TaskExecutor};
pub use id::JobId;
pub use job::{Job, JobPriority, JobStatus};
