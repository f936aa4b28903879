//! Test: terminal-state exclusivity and finality

use crate::helpers::*;
use etl_pipeline::core::{RunRecord, RunState};
use etl_pipeline::job::JobError;
use etl_pipeline::orchestrator::{Orchestrator, RunEvent};

#[tokio::test]
async fn test_run_reaches_exactly_one_terminal_state() {
    // A run never observes both terminals: the event stream of a success
    // has no RunFailed, and the event stream of a failure has no
    // RunSucceeded.
    for fail in [false, true] {
        let runner = if fail {
            MockRunner::failing(|| JobError::Internal("boom".to_string()))
        } else {
            MockRunner::succeeding()
        };
        let orchestrator = Orchestrator::new(runner, "Ecommerce ETL");
        let events = collect_events(&orchestrator);

        let record = orchestrator.run(&sample_input()).await;
        assert!(record.state.is_terminal());

        let events = events.lock().unwrap();
        let succeeded = events
            .iter()
            .filter(|e| matches!(e, RunEvent::RunSucceeded { .. }))
            .count();
        let failed = events
            .iter()
            .filter(|e| matches!(e, RunEvent::RunFailed { .. }))
            .count();
        assert_eq!(succeeded + failed, 1);
    }
}

#[test]
fn test_no_transition_out_of_succeeded() {
    let mut record = RunRecord::new("Ecommerce ETL");
    record.start();
    record.succeed();
    let completed_at = record.completed_at;

    record.fail();
    record.succeed();

    assert_eq!(record.state, RunState::Succeeded);
    assert_eq!(record.completed_at, completed_at);
}

#[test]
fn test_no_transition_out_of_failed() {
    let mut record = RunRecord::new("Ecommerce ETL");
    record.start();
    record.fail();

    record.succeed();

    assert_eq!(record.state, RunState::failed());
}

#[tokio::test]
async fn test_repeated_runs_are_independent() {
    // The orchestrator holds no run state of its own: a fresh record is
    // produced per run, each reaching its own terminal.
    let orchestrator = Orchestrator::new(MockRunner::succeeding(), "Ecommerce ETL");

    let first = orchestrator.run(&sample_input()).await;
    let second = orchestrator.run(&sample_input()).await;

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.state, RunState::Succeeded);
    assert_eq!(second.state, RunState::Succeeded);
}
