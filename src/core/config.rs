//! Pipeline configuration from YAML

use crate::core::input::PipelineInput;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Pipeline version (optional)
    #[serde(default)]
    pub version: Option<String>,

    /// AWS region for all service clients
    #[serde(default = "default_region")]
    pub region: String,

    /// Managed compute job settings
    pub job: JobConfig,

    /// The four data locations forwarded to the job
    pub paths: PathsConfig,

    /// Object storage provisioning (out-of-band, before the workflow runs)
    #[serde(default)]
    pub storage: Option<StorageConfig>,

    /// Query catalog registration (out-of-band, after a successful run)
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

/// Glue job settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Name of the Glue job definition to invoke
    pub name: String,

    /// How often to poll the job run state, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

/// The four data locations, all S3 URIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw transaction data (e.g. s3://bucket/raw/)
    pub input: String,

    /// Transformed output destination (e.g. s3://bucket/transformed/)
    pub output: String,

    /// Currency rates reference data
    pub currency_rates: String,

    /// Product categories reference data
    pub product_categories: String,
}

/// Object storage layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket holding raw, reference, and transformed data
    pub bucket: String,

    /// Prefix for raw transaction uploads
    #[serde(default = "default_raw_prefix")]
    pub raw_prefix: String,

    /// Prefix for reference data uploads
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

/// Query catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Glue database name
    pub database: String,

    /// Glue table name for the transformed data
    pub table: String,

    /// S3 location the table points at; defaults to paths.output
    #[serde(default)]
    pub location: Option<String>,

    /// Where Athena writes query results (a separate bucket)
    pub query_output_location: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_raw_prefix() -> String {
    "raw/".to_string()
}

fn default_reference_prefix() -> String {
    "reference/".to_string()
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the pipeline configuration
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            anyhow::bail!("Pipeline name must not be empty");
        }
        if self.job.name.trim().is_empty() {
            anyhow::bail!("Job name must not be empty");
        }
        if self.job.poll_interval_secs == 0 {
            anyhow::bail!("Job poll interval must be greater than zero");
        }

        for (field, value) in [
            ("paths.input", &self.paths.input),
            ("paths.output", &self.paths.output),
            ("paths.currency_rates", &self.paths.currency_rates),
            ("paths.product_categories", &self.paths.product_categories),
        ] {
            if !value.starts_with("s3://") {
                anyhow::bail!("{} must be an s3:// URI, got '{}'", field, value);
            }
        }

        if let Some(storage) = &self.storage {
            if storage.bucket.trim().is_empty() {
                anyhow::bail!("storage.bucket must not be empty");
            }
        }

        if let Some(catalog) = &self.catalog {
            if catalog.database.trim().is_empty() || catalog.table.trim().is_empty() {
                anyhow::bail!("catalog.database and catalog.table must not be empty");
            }
            if !catalog.query_output_location.starts_with("s3://") {
                anyhow::bail!(
                    "catalog.query_output_location must be an s3:// URI, got '{}'",
                    catalog.query_output_location
                );
            }
            if let Some(location) = &catalog.location {
                if !location.starts_with("s3://") {
                    anyhow::bail!("catalog.location must be an s3:// URI, got '{}'", location);
                }
            }
        }

        Ok(())
    }

    /// Build the run-time input from the configured paths
    pub fn to_input(&self) -> PipelineInput {
        PipelineInput {
            s3_input_path: self.paths.input.clone(),
            s3_output_path: self.paths.output.clone(),
            currency_rates_path: self.paths.currency_rates.clone(),
            product_categories_path: self.paths.product_categories.clone(),
        }
    }

    /// The S3 location the catalog table points at
    pub fn table_location(&self) -> Option<&str> {
        let catalog = self.catalog.as_ref()?;
        Some(catalog.location.as_deref().unwrap_or(&self.paths.output))
    }
}
