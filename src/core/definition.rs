//! Amazon States Language rendering of the workflow
//!
//! The orchestration state machine can also be deployed as a managed Step
//! Functions workflow. This module renders the same three-state machine
//! (one Task state, a Succeed terminal, a Fail terminal reached through a
//! single States.ALL catch) as an ASL JSON document for out-of-band
//! deployment.

use crate::core::config::PipelineConfig;
use crate::core::input::{
    ARG_CURRENCY_RATES_PATH, ARG_INPUT_PATH, ARG_OUTPUT_PATH, ARG_PRODUCT_CATEGORIES_PATH,
};
use crate::core::state::{FAILURE_CAUSE, FAILURE_ERROR};
use serde_json::{json, Value};

/// Name of the single non-terminal Task state
pub const TASK_STATE: &str = "RunGlueJob";
/// Name of the Succeed terminal state
pub const SUCCEEDED_STATE: &str = "Succeeded";
/// Name of the Fail terminal state
pub const FAILED_STATE: &str = "Failed";

/// Render the workflow as a states-language document
///
/// The Task state runs the Glue job synchronously (`.sync`) and forwards
/// the four invocation-input path fields verbatim as job arguments. Any
/// error kind is caught by one States.ALL arm and routed to the Fail
/// state, which carries the fixed cause/error pair.
pub fn state_machine(config: &PipelineConfig) -> Value {
    json!({
        "Comment": format!("{}: run the managed transform job and report ok/error", config.name),
        "StartAt": TASK_STATE,
        "States": {
            TASK_STATE: {
                "Type": "Task",
                "Resource": "arn:aws:states:::glue:startJobRun.sync",
                "Parameters": {
                    "JobName": config.job.name,
                    "Arguments": {
                        format!("{}.$", ARG_INPUT_PATH): "$.s3InputPath",
                        format!("{}.$", ARG_OUTPUT_PATH): "$.s3OutputPath",
                        format!("{}.$", ARG_CURRENCY_RATES_PATH): "$.currencyRatesPath",
                        format!("{}.$", ARG_PRODUCT_CATEGORIES_PATH): "$.productCategoriesPath"
                    }
                },
                "Next": SUCCEEDED_STATE,
                "Catch": [
                    {
                        "ErrorEquals": ["States.ALL"],
                        "Next": FAILED_STATE
                    }
                ]
            },
            FAILED_STATE: {
                "Type": "Fail",
                "Cause": FAILURE_CAUSE,
                "Error": FAILURE_ERROR
            },
            SUCCEEDED_STATE: {
                "Type": "Succeed"
            }
        }
    })
}
