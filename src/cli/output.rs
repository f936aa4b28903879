//! CLI output formatting

use crate::core::{RunOutcome, RunState};
use crate::orchestrator::RunEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a spinner for the blocking wait on the job run
pub fn create_wait_spinner(job_name: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Waiting for job '{}'", job_name));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Format a run state for display
pub fn format_run_state(state: &RunState) -> String {
    match state {
        RunState::Start => style("START").dim().to_string(),
        RunState::Succeeded => style("SUCCEEDED").green().to_string(),
        RunState::Failed { .. } => style("FAILED").red().to_string(),
    }
}

/// Format a terminal outcome for display
pub fn format_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Succeeded => format!("{} {}", CHECK, style("Succeeded").green()),
        RunOutcome::Failed { cause, error } => format!(
            "{} {}: {} ({})",
            CROSS,
            style("Failed").red(),
            cause,
            style(error).dim()
        ),
    }
}

/// Format a run event for display
pub fn format_run_event(event: &RunEvent) -> String {
    match event {
        RunEvent::RunStarted {
            run_id,
            pipeline_name,
        } => format!(
            "{} Starting workflow {} ({})",
            ROCKET,
            style(pipeline_name).bold(),
            style(&run_id.to_string()[..8]).dim()
        ),
        RunEvent::JobSucceeded { job_run_id, .. } => format!(
            "{} Job run {} completed",
            CHECK,
            style(job_run_id).cyan()
        ),
        RunEvent::RunSucceeded { run_id } => format!(
            "{} Workflow {} reached Succeeded",
            CHECK,
            style(&run_id.to_string()[..8]).dim()
        ),
        RunEvent::RunFailed { cause, error, .. } => format!(
            "{} {} ({})",
            CROSS,
            style(cause).red(),
            style(error).dim()
        ),
    }
}
