//! Workflow orchestrator - drives one job invocation to a terminal state
//!
//! The orchestrator is the one piece of control flow in this repository:
//! it issues a single blocking "run job and wait" call and maps the
//! result onto a terminal pipeline state. One success edge, one catch-all
//! error edge, nothing else — no retries, no branching, no fan-out.

use crate::core::input::PipelineInput;
use crate::core::state::{RunOutcome, RunRecord, FAILURE_CAUSE, FAILURE_ERROR};
use crate::job::JobRunner;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during a workflow run
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunStarted {
        run_id: Uuid,
        pipeline_name: String,
    },
    JobSucceeded {
        run_id: Uuid,
        job_run_id: String,
    },
    RunSucceeded {
        run_id: Uuid,
    },
    RunFailed {
        run_id: Uuid,
        cause: String,
        error: String,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(RunEvent) + Send + Sync>;

/// The workflow orchestrator
pub struct Orchestrator<J> {
    runner: J,
    pipeline_name: String,
    event_handlers: Mutex<Vec<EventHandler>>,
}

impl<J: JobRunner> Orchestrator<J> {
    pub fn new(runner: J, pipeline_name: impl Into<String>) -> Self {
        Self {
            runner,
            pipeline_name: pipeline_name.into(),
            event_handlers: Mutex::new(Vec::new()),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(RunEvent) + Send + Sync + 'static,
    {
        self.event_handlers
            .lock()
            .expect("event handler lock poisoned")
            .push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: RunEvent) {
        let handlers = self
            .event_handlers
            .lock()
            .expect("event handler lock poisoned");
        for handler in handlers.iter() {
            handler(event.clone());
        }
    }

    /// Execute one workflow run for the given input
    ///
    /// Returns the record of the run, which has reached exactly one of
    /// the two terminal states by the time this resolves.
    pub async fn run(&self, input: &PipelineInput) -> RunRecord {
        let mut record = RunRecord::new(&self.pipeline_name);
        info!(
            pipeline = %self.pipeline_name,
            run_id = %record.run_id,
            "Starting workflow run"
        );
        self.emit_event(RunEvent::RunStarted {
            run_id: record.run_id,
            pipeline_name: self.pipeline_name.clone(),
        });

        record.start();

        // The four path fields pass through to the job unchanged.
        let args = input.job_arguments();

        // One synchronous invocation; the run leaves Start on its result.
        match self.runner.run_to_completion(&args).await {
            Ok(completion) => {
                self.emit_event(RunEvent::JobSucceeded {
                    run_id: record.run_id,
                    job_run_id: completion.job_run_id,
                });
                record.succeed();
                info!(run_id = %record.run_id, "Workflow run succeeded");
                self.emit_event(RunEvent::RunSucceeded {
                    run_id: record.run_id,
                });
            }
            // Catch-all: every error kind collapses into the one Failed
            // terminal with its fixed cause and error code.
            Err(err) => {
                error!(run_id = %record.run_id, %err, "Job invocation failed");
                record.fail();
                self.emit_event(RunEvent::RunFailed {
                    run_id: record.run_id,
                    cause: FAILURE_CAUSE.to_string(),
                    error: FAILURE_ERROR.to_string(),
                });
            }
        }

        record
    }

    /// Execute one workflow run and return only its terminal outcome
    pub async fn run_outcome(&self, input: &PipelineInput) -> RunOutcome {
        self.run(input)
            .await
            .outcome()
            .unwrap_or_else(RunOutcome::failed)
    }
}
