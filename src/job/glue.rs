//! AWS Glue job runner

use crate::core::input::JobArguments;
use crate::job::{JobCompletion, JobError, JobRunner};
use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_glue::{GetJobRunRequest, Glue, GlueClient, StartJobRunRequest};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Glue job run state signalling success
const STATE_SUCCEEDED: &str = "SUCCEEDED";

/// Glue job run states that terminate a run without success
const STATES_UNSUCCESSFUL: [&str; 4] = ["FAILED", "ERROR", "TIMEOUT", "STOPPED"];

/// Runs a Glue job synchronously: StartJobRun, then GetJobRun polling
/// until the run leaves the in-progress states. No timeout is enforced
/// here beyond what the Glue job definition itself configures.
pub struct GlueJobRunner {
    client: GlueClient,
    job_name: String,
    poll_interval: Duration,
}

impl GlueJobRunner {
    /// Create a runner for the named Glue job
    pub fn new(region: Region, job_name: impl Into<String>, poll_interval: Duration) -> Self {
        Self {
            client: GlueClient::new(region),
            job_name: job_name.into(),
            poll_interval,
        }
    }

    /// The Glue job this runner invokes
    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    async fn start(&self, args: &JobArguments) -> Result<String, JobError> {
        let request = StartJobRunRequest {
            job_name: self.job_name.clone(),
            arguments: Some(args.as_map().clone()),
            ..Default::default()
        };

        let response = self
            .client
            .start_job_run(request)
            .await
            .map_err(|e| JobError::Aws(e.to_string()))?;

        response
            .job_run_id
            .ok_or_else(|| JobError::Internal("StartJobRun returned no run id".to_string()))
    }

    async fn poll(&self, job_run_id: &str) -> Result<JobCompletion, JobError> {
        loop {
            let response = self
                .client
                .get_job_run(GetJobRunRequest {
                    job_name: self.job_name.clone(),
                    run_id: job_run_id.to_string(),
                    predecessors_included: None,
                })
                .await
                .map_err(|e| JobError::Aws(e.to_string()))?;

            let run = response.job_run.ok_or_else(|| {
                JobError::Internal(format!("no run details for job run {}", job_run_id))
            })?;

            let state = run.job_run_state.unwrap_or_default();
            debug!(job = %self.job_name, run_id = %job_run_id, %state, "Polled job run");

            if state == STATE_SUCCEEDED {
                return Ok(JobCompletion {
                    job_run_id: job_run_id.to_string(),
                    state,
                });
            }

            if STATES_UNSUCCESSFUL.contains(&state.as_str()) {
                let message = run
                    .error_message
                    .unwrap_or_else(|| "no error message reported".to_string());
                warn!(job = %self.job_name, run_id = %job_run_id, %state, "Job run unsuccessful");
                return Err(JobError::Execution { state, message });
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl JobRunner for GlueJobRunner {
    async fn run_to_completion(&self, args: &JobArguments) -> Result<JobCompletion, JobError> {
        let job_run_id = self.start(args).await?;
        info!(job = %self.job_name, run_id = %job_run_id, "Glue job run started");

        let completion = self.poll(&job_run_id).await?;
        info!(job = %self.job_name, run_id = %job_run_id, "Glue job run succeeded");
        Ok(completion)
    }
}
