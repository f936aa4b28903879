//! Core domain models for the ETL pipeline
//!
//! This module defines the configuration, run-time input, and workflow
//! state types the orchestrator operates on.

pub mod config;
pub mod definition;
pub mod input;
pub mod state;

pub use config::*;
pub use input::*;
pub use state::*;
