//! Managed compute job invocation
//!
//! The transform job is an opaque unit of work owned by an external
//! service. The orchestrator only needs one operation from it: start the
//! job and block until it reaches a terminal state.

pub mod glue;

use crate::core::input::JobArguments;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use glue::GlueJobRunner;

/// Error types for job invocations
///
/// Runners keep a small taxonomy for log diagnostics; the orchestrator
/// collapses every variant into the single Failed terminal.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("AWS API error: {0}")]
    Aws(String),

    #[error("job run ended in state {state}: {message}")]
    Execution { state: String, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Details of a completed job run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCompletion {
    /// Run identifier assigned by the external service
    pub job_run_id: String,

    /// Terminal state reported by the service
    pub state: String,
}

/// Trait for job runners - allows for different implementations
#[async_trait]
pub trait JobRunner: Send + Sync {
    /// Start the job with the given arguments and block until it reaches
    /// a terminal state. Returns Ok only for a successful run.
    async fn run_to_completion(&self, args: &JobArguments) -> Result<JobCompletion, JobError>;
}
