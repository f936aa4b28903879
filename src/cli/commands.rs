//! CLI command definitions

use clap::Args;
use std::path::PathBuf;

/// Run the workflow
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Override the raw transaction data location
    #[arg(long)]
    pub input: Option<String>,

    /// Override the transformed output destination
    #[arg(long)]
    pub output: Option<String>,

    /// Override the currency rates reference data location
    #[arg(long)]
    pub currency_rates: Option<String>,

    /// Override the product categories reference data location
    #[arg(long)]
    pub product_categories: Option<String>,
}

/// Validate a pipeline configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Provision object storage
#[derive(Debug, Args, Clone)]
pub struct SetupCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Local transaction files to upload under the raw prefix
    #[arg(long)]
    pub upload_raw: Vec<PathBuf>,

    /// Local reference files to upload under the reference prefix
    #[arg(long)]
    pub upload_reference: Vec<PathBuf>,
}

/// Register the transformed output in the query catalog
#[derive(Debug, Args, Clone)]
pub struct RegisterCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Also run MSCK REPAIR TABLE to discover new partitions
    #[arg(long)]
    pub repair: bool,
}

/// Print the workflow definition
#[derive(Debug, Args, Clone)]
pub struct DefinitionCommand {
    /// Path to pipeline YAML file
    #[arg(short, long)]
    pub file: String,

    /// Compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}
