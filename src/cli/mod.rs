//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{DefinitionCommand, RegisterCommand, RunCommand, SetupCommand, ValidateCommand};
use std::ffi::OsString;

/// ETL pipeline tool for AWS-managed batch transforms
#[derive(Debug, Parser, Clone)]
#[command(name = "etl-pipeline")]
#[command(author = "etl-pipeline Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Orchestrates a managed AWS ETL pipeline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the workflow: invoke the transform job and wait for it
    Run(RunCommand),

    /// Validate a pipeline configuration
    Validate(ValidateCommand),

    /// Provision the S3 bucket and upload data files
    Setup(SetupCommand),

    /// Register the transformed output in the query catalog
    Register(RegisterCommand),

    /// Print the workflow as a states-language JSON document
    Definition(DefinitionCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
