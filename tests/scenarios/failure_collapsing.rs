//! Test: every error kind collapses into the one Failed terminal
//!
//! The workflow deliberately does not distinguish failure classes: a job
//! execution error, an API error, and an internal error all produce the
//! same fixed cause/error pair.

use crate::helpers::*;
use etl_pipeline::core::{RunOutcome, RunState};
use etl_pipeline::job::JobError;
use etl_pipeline::orchestrator::{Orchestrator, RunEvent};

fn error_kinds() -> Vec<(&'static str, fn() -> JobError)> {
    vec![
        ("aws api error", || {
            JobError::Aws("AccessDeniedException: not authorized".to_string())
        }),
        ("job execution error", || JobError::Execution {
            state: "FAILED".to_string(),
            message: "Command failed with exit code 1".to_string(),
        }),
        ("job timeout", || JobError::Execution {
            state: "TIMEOUT".to_string(),
            message: "Job run exceeded its timeout".to_string(),
        }),
        ("internal error", || {
            JobError::Internal("StartJobRun returned no run id".to_string())
        }),
    ]
}

#[tokio::test]
async fn test_all_error_kinds_collapse_to_fixed_failed_pair() {
    for (kind, error) in error_kinds() {
        let orchestrator = Orchestrator::new(MockRunner::failing(error), "Ecommerce ETL");
        let outcome = orchestrator.run_outcome(&sample_input()).await;

        match outcome {
            RunOutcome::Failed { cause, error } => {
                assert_eq!(cause, "ETL Pipeline failed", "wrong cause for {}", kind);
                assert_eq!(
                    error, "Glue Job or subsequent step failed",
                    "wrong error for {}",
                    kind
                );
            }
            other => panic!("Expected Failed for {}, got {:?}", kind, other),
        }
    }
}

#[tokio::test]
async fn test_failed_run_never_reaches_succeeded() {
    let orchestrator = Orchestrator::new(
        MockRunner::failing(|| JobError::Aws("throttled".to_string())),
        "Ecommerce ETL",
    );
    let record = orchestrator.run(&sample_input()).await;

    assert_eq!(record.state, RunState::failed());
    assert_ne!(record.state, RunState::Succeeded);
}

#[tokio::test]
async fn test_failure_event_carries_fixed_pair() {
    let orchestrator = Orchestrator::new(
        MockRunner::failing(|| JobError::Internal("boom".to_string())),
        "Ecommerce ETL",
    );
    let events = collect_events(&orchestrator);

    orchestrator.run(&sample_input()).await;

    let events = events.lock().unwrap();
    let failed = events
        .iter()
        .find(|e| matches!(e, RunEvent::RunFailed { .. }))
        .expect("a failed run emits RunFailed");
    if let RunEvent::RunFailed { cause, error, .. } = failed {
        assert_eq!(cause, "ETL Pipeline failed");
        assert_eq!(error, "Glue Job or subsequent step failed");
    }

    // No success events in a failed run
    assert!(!events
        .iter()
        .any(|e| matches!(e, RunEvent::RunSucceeded { .. } | RunEvent::JobSucceeded { .. })));
}

#[tokio::test]
async fn test_no_retry_on_failure() {
    let runner = MockRunner::failing(|| JobError::Aws("transient".to_string()));
    let captured = runner.captured();
    let orchestrator = Orchestrator::new(runner, "Ecommerce ETL");

    orchestrator.run(&sample_input()).await;

    // Failure is final: exactly one invocation, no retry
    assert_eq!(captured.lock().unwrap().len(), 1);
}
