//! Workflow run state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed human-readable cause attached to the Failed terminal state.
pub const FAILURE_CAUSE: &str = "ETL Pipeline failed";

/// Fixed error code attached to the Failed terminal state.
pub const FAILURE_ERROR: &str = "Glue Job or subsequent step failed";

/// State of a workflow run
///
/// The workflow is a three-state directed acyclic graph with exactly two
/// edges: Start → Succeeded when the job invocation completes without
/// error, and Start → Failed on any error kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Initial state: the job invocation is issued from here
    Start,
    /// Terminal: the job completed without error
    Succeeded,
    /// Terminal: the job invocation raised an error of any kind
    Failed {
        cause: String,
        error: String,
    },
}

impl RunState {
    /// Check if the run is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Succeeded | RunState::Failed { .. })
    }

    /// The Failed terminal with its fixed cause and error code
    pub fn failed() -> Self {
        RunState::Failed {
            cause: FAILURE_CAUSE.to_string(),
            error: FAILURE_ERROR.to_string(),
        }
    }
}

/// Terminal outcome of one workflow run
///
/// Success carries no payload; reaching it is itself the signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Succeeded,
    Failed {
        cause: String,
        error: String,
    },
}

impl RunOutcome {
    /// The Failed outcome with its fixed cause and error code
    pub fn failed() -> Self {
        RunOutcome::Failed {
            cause: FAILURE_CAUSE.to_string(),
            error: FAILURE_ERROR.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }
}

/// Record of a single workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique run ID
    pub run_id: Uuid,

    /// Pipeline name
    pub pipeline_name: String,

    /// Current run state
    pub state: RunState,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reached a terminal state
    pub completed_at: Option<DateTime<Utc>>,
}

impl RunRecord {
    /// Create a new record in the Start state
    pub fn new(pipeline_name: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            pipeline_name: pipeline_name.into(),
            state: RunState::Start,
            started_at: None,
            completed_at: None,
        }
    }

    /// Mark the run as started
    pub fn start(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// Transition Start → Succeeded. Terminal states are final: calling
    /// this after the run has already terminated changes nothing.
    pub fn succeed(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state = RunState::Succeeded;
        self.completed_at = Some(Utc::now());
    }

    /// Transition Start → Failed with the fixed cause/error pair.
    /// Terminal states are final as with [`RunRecord::succeed`].
    pub fn fail(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.state = RunState::failed();
        self.completed_at = Some(Utc::now());
    }

    /// Terminal outcome, if the run has reached one
    pub fn outcome(&self) -> Option<RunOutcome> {
        match &self.state {
            RunState::Start => None,
            RunState::Succeeded => Some(RunOutcome::Succeeded),
            RunState::Failed { cause, error } => Some(RunOutcome::Failed {
                cause: cause.clone(),
                error: error.clone(),
            }),
        }
    }
}
