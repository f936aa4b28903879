//! etl-pipeline - orchestrates a managed AWS ETL pipeline for e-commerce
//! transaction data

pub mod catalog;
pub mod cli;
pub mod core;
pub mod job;
pub mod orchestrator;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{
    JobArguments, PipelineConfig, PipelineInput, RunOutcome, RunRecord, RunState, FAILURE_CAUSE,
    FAILURE_ERROR,
};
pub use job::{GlueJobRunner, JobCompletion, JobError, JobRunner};
pub use orchestrator::{Orchestrator, RunEvent};
