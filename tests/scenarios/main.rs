//! Scenario-based tests for the workflow orchestrator

mod helpers;

mod argument_forwarding;
mod failure_collapsing;
mod success_run;
mod terminal_states;
