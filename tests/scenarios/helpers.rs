//! Test utility functions for etl-pipeline

use async_trait::async_trait;
use etl_pipeline::core::{JobArguments, PipelineInput};
use etl_pipeline::job::{JobCompletion, JobError, JobRunner};
use etl_pipeline::orchestrator::{Orchestrator, RunEvent};
use std::sync::{Arc, Mutex};

type Behavior = Box<dyn Fn() -> Result<JobCompletion, JobError> + Send + Sync>;

/// Mock runner with a scripted result
///
/// Captures every argument set it is invoked with so tests can assert on
/// exactly what was forwarded to the job.
pub struct MockRunner {
    behavior: Behavior,
    captured: Arc<Mutex<Vec<JobArguments>>>,
}

impl MockRunner {
    pub fn with<F>(behavior: F) -> Self
    where
        F: Fn() -> Result<JobCompletion, JobError> + Send + Sync + 'static,
    {
        Self {
            behavior: Box::new(behavior),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A runner whose job run always succeeds
    pub fn succeeding() -> Self {
        Self::with(|| {
            Ok(JobCompletion {
                job_run_id: "jr_mock".to_string(),
                state: "SUCCEEDED".to_string(),
            })
        })
    }

    /// A runner whose job run always fails with the given error builder
    pub fn failing<F>(error: F) -> Self
    where
        F: Fn() -> JobError + Send + Sync + 'static,
    {
        Self::with(move || Err(error()))
    }

    /// Handle on the captured argument sets; clone before the runner is
    /// moved into an orchestrator
    pub fn captured(&self) -> Arc<Mutex<Vec<JobArguments>>> {
        self.captured.clone()
    }
}

#[async_trait]
impl JobRunner for MockRunner {
    async fn run_to_completion(&self, args: &JobArguments) -> Result<JobCompletion, JobError> {
        self.captured.lock().unwrap().push(args.clone());
        (self.behavior)()
    }
}

/// The worked example input from the pipeline documentation
pub fn sample_input() -> PipelineInput {
    PipelineInput {
        s3_input_path: "s3://raw/in.csv".to_string(),
        s3_output_path: "s3://clean/out/".to_string(),
        currency_rates_path: "s3://ref/rates.json".to_string(),
        product_categories_path: "s3://ref/cats.json".to_string(),
    }
}

/// Attach a collecting event handler to an orchestrator
pub fn collect_events<J: JobRunner>(
    orchestrator: &Orchestrator<J>,
) -> Arc<Mutex<Vec<RunEvent>>> {
    let events: Arc<Mutex<Vec<RunEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    orchestrator.add_event_handler(move |event| {
        sink.lock().unwrap().push(event);
    });
    events
}
