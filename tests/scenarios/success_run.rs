//! Test: a successful job invocation yields exactly the Succeeded terminal

use crate::helpers::*;
use etl_pipeline::core::{RunOutcome, RunState};
use etl_pipeline::orchestrator::{Orchestrator, RunEvent};

#[tokio::test]
async fn test_successful_job_reaches_succeeded() {
    let orchestrator = Orchestrator::new(MockRunner::succeeding(), "Ecommerce ETL");
    let record = orchestrator.run(&sample_input()).await;

    assert_eq!(record.state, RunState::Succeeded);
    assert_eq!(record.outcome(), Some(RunOutcome::Succeeded));
    assert!(record.started_at.is_some());
    assert!(record.completed_at.is_some());
}

#[tokio::test]
async fn test_success_carries_no_failure_payload() {
    let orchestrator = Orchestrator::new(MockRunner::succeeding(), "Ecommerce ETL");
    let outcome = orchestrator.run_outcome(&sample_input()).await;

    assert!(outcome.is_success());
    assert!(!matches!(outcome, RunOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_success_event_sequence() {
    let orchestrator = Orchestrator::new(MockRunner::succeeding(), "Ecommerce ETL");
    let events = collect_events(&orchestrator);

    orchestrator.run(&sample_input()).await;

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        RunEvent::RunStarted { pipeline_name, .. } if pipeline_name == "Ecommerce ETL"
    ));
    assert!(matches!(
        &events[1],
        RunEvent::JobSucceeded { job_run_id, .. } if job_run_id == "jr_mock"
    ));
    assert!(matches!(&events[2], RunEvent::RunSucceeded { .. }));

    // No Failed event anywhere in a successful run
    assert!(!events
        .iter()
        .any(|e| matches!(e, RunEvent::RunFailed { .. })));
}
