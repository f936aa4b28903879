//! Run-time pipeline input and job argument construction

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Glue argument name for the raw transaction data location
pub const ARG_INPUT_PATH: &str = "--S3_INPUT_PATH";
/// Glue argument name for the transformed data destination
pub const ARG_OUTPUT_PATH: &str = "--S3_OUTPUT_PATH";
/// Glue argument name for the currency reference data location
pub const ARG_CURRENCY_RATES_PATH: &str = "--CURRENCY_RATES_PATH";
/// Glue argument name for the category reference data location
pub const ARG_PRODUCT_CATEGORIES_PATH: &str = "--PRODUCT_CATEGORIES_PATH";

/// Input for one pipeline run
///
/// Four opaque S3 location URIs, supplied at invocation time and
/// immutable for the run's duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineInput {
    /// Raw transaction files to read
    pub s3_input_path: String,

    /// Destination for the transformed output
    pub s3_output_path: String,

    /// Currency conversion reference data
    pub currency_rates_path: String,

    /// Product category reference data
    pub product_categories_path: String,
}

impl PipelineInput {
    /// Build the named parameters for the compute job
    pub fn job_arguments(&self) -> JobArguments {
        JobArguments::from_input(self)
    }
}

/// Named parameters forwarded to the external compute job
///
/// The four input path fields pass through unchanged; nothing is dropped,
/// renamed, or mutated beyond attaching the Glue `--NAME` argument keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobArguments {
    arguments: HashMap<String, String>,
}

impl JobArguments {
    fn from_input(input: &PipelineInput) -> Self {
        let mut arguments = HashMap::new();
        arguments.insert(ARG_INPUT_PATH.to_string(), input.s3_input_path.clone());
        arguments.insert(ARG_OUTPUT_PATH.to_string(), input.s3_output_path.clone());
        arguments.insert(
            ARG_CURRENCY_RATES_PATH.to_string(),
            input.currency_rates_path.clone(),
        );
        arguments.insert(
            ARG_PRODUCT_CATEGORIES_PATH.to_string(),
            input.product_categories_path.clone(),
        );
        Self { arguments }
    }

    /// Get an argument value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).map(String::as_str)
    }

    /// The full argument map, as passed to the job API
    pub fn as_map(&self) -> &HashMap<String, String> {
        &self.arguments
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}
