//! Test: the four input path fields reach the job unmodified and in full

use crate::helpers::*;
use etl_pipeline::core::{
    ARG_CURRENCY_RATES_PATH, ARG_INPUT_PATH, ARG_OUTPUT_PATH, ARG_PRODUCT_CATEGORIES_PATH,
};
use etl_pipeline::orchestrator::Orchestrator;

#[tokio::test]
async fn test_all_four_paths_forwarded_verbatim() {
    let runner = MockRunner::succeeding();
    let captured = runner.captured();
    let orchestrator = Orchestrator::new(runner, "Ecommerce ETL");

    orchestrator.run(&sample_input()).await;

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);

    let args = &captured[0];
    assert_eq!(args.len(), 4);
    assert_eq!(args.get(ARG_INPUT_PATH), Some("s3://raw/in.csv"));
    assert_eq!(args.get(ARG_OUTPUT_PATH), Some("s3://clean/out/"));
    assert_eq!(args.get(ARG_CURRENCY_RATES_PATH), Some("s3://ref/rates.json"));
    assert_eq!(
        args.get(ARG_PRODUCT_CATEGORIES_PATH),
        Some("s3://ref/cats.json")
    );
}

#[tokio::test]
async fn test_paths_are_opaque_and_not_normalized() {
    // Odd-looking URIs pass through untouched: the orchestrator treats
    // them as opaque location identifiers.
    let mut input = sample_input();
    input.s3_input_path = "s3://bucket//double//slash/in.csv ".to_string();
    input.currency_rates_path = "s3://ref/RATES.JSON".to_string();

    let runner = MockRunner::succeeding();
    let captured = runner.captured();
    let orchestrator = Orchestrator::new(runner, "Ecommerce ETL");

    orchestrator.run(&input).await;

    let captured = captured.lock().unwrap();
    let args = &captured[0];
    assert_eq!(
        args.get(ARG_INPUT_PATH),
        Some("s3://bucket//double//slash/in.csv ")
    );
    assert_eq!(args.get(ARG_CURRENCY_RATES_PATH), Some("s3://ref/RATES.JSON"));
}

#[tokio::test]
async fn test_arguments_forwarded_even_when_job_fails() {
    let runner = MockRunner::failing(|| etl_pipeline::job::JobError::Internal("boom".to_string()));
    let captured = runner.captured();
    let orchestrator = Orchestrator::new(runner, "Ecommerce ETL");

    orchestrator.run(&sample_input()).await;

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].len(), 4);
}
