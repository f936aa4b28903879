use anyhow::{bail, Context, Result};
use etl_pipeline::catalog::CatalogRegistrar;
use etl_pipeline::cli::commands::{
    DefinitionCommand, RegisterCommand, RunCommand, SetupCommand, ValidateCommand,
};
use etl_pipeline::cli::output::*;
use etl_pipeline::cli::{Cli, Command};
use etl_pipeline::core::{definition, PipelineConfig, PipelineInput};
use etl_pipeline::job::GlueJobRunner;
use etl_pipeline::orchestrator::Orchestrator;
use etl_pipeline::storage::ObjectStore;
use rusoto_core::Region;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Run(cmd) => run_workflow(cmd).await?,
        Command::Validate(cmd) => validate_config(cmd)?,
        Command::Setup(cmd) => setup_storage(cmd).await?,
        Command::Register(cmd) => register_catalog(cmd).await?,
        Command::Definition(cmd) => print_definition(cmd)?,
    }

    Ok(())
}

fn load_config(path: &str) -> Result<PipelineConfig> {
    let config =
        PipelineConfig::from_file(path).context("Failed to load pipeline config")?;
    println!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());
    Ok(config)
}

fn parse_region(config: &PipelineConfig) -> Result<Region> {
    config
        .region
        .parse::<Region>()
        .with_context(|| format!("Invalid AWS region '{}'", config.region))
}

/// Apply CLI path overrides on top of the configured input
fn build_input(config: &PipelineConfig, cmd: &RunCommand) -> PipelineInput {
    let mut input = config.to_input();
    for (field, value) in [
        (&mut input.s3_input_path, &cmd.input),
        (&mut input.s3_output_path, &cmd.output),
        (&mut input.currency_rates_path, &cmd.currency_rates),
        (&mut input.product_categories_path, &cmd.product_categories),
    ] {
        if let Some(value) = value {
            println!("{} Path override: {}", INFO, style(value).cyan());
            *field = value.clone();
        }
    }
    input
}

async fn run_workflow(cmd: &RunCommand) -> Result<()> {
    let config = load_config(&cmd.file)?;
    let input = build_input(&config, cmd);
    let region = parse_region(&config)?;

    let runner = GlueJobRunner::new(
        region,
        &config.job.name,
        Duration::from_secs(config.job.poll_interval_secs),
    );
    let orchestrator = Orchestrator::new(runner, &config.name);

    let spinner = create_wait_spinner(&config.job.name);
    let event_sink = spinner.clone();
    orchestrator.add_event_handler(move |event| {
        event_sink.println(format_run_event(&event));
    });

    let outcome = orchestrator.run_outcome(&input).await;
    spinner.finish_and_clear();

    println!("\n{}", format_outcome(&outcome));

    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_config(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let result = PipelineConfig::from_file(&cmd.file);

    match result {
        Ok(config) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            println!("  Region: {}", style(&config.region).cyan());
            println!("  Job: {}", style(&config.job.name).cyan());

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

async fn setup_storage(cmd: &SetupCommand) -> Result<()> {
    let config = load_config(&cmd.file)?;
    let Some(storage) = &config.storage else {
        bail!("No storage section in '{}'", cmd.file);
    };
    let region = parse_region(&config)?;

    let store = ObjectStore::new(region, &storage.bucket);
    store.ensure_bucket().await?;
    println!("{} Bucket {} is ready", CHECK, style(store.bucket()).bold());

    for (files, prefix) in [
        (&cmd.upload_raw, &storage.raw_prefix),
        (&cmd.upload_reference, &storage.reference_prefix),
    ] {
        for file in files {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("Invalid file name '{}'", file.display()))?;
            let key = format!("{}{}", prefix, name);
            store.upload_file(file, &key).await?;
            println!(
                "{} Uploaded {} to s3://{}/{}",
                CHECK,
                style(file.display()).dim(),
                store.bucket(),
                key
            );
        }
    }

    Ok(())
}

async fn register_catalog(cmd: &RegisterCommand) -> Result<()> {
    let config = load_config(&cmd.file)?;
    let Some(catalog) = &config.catalog else {
        bail!("No catalog section in '{}'", cmd.file);
    };
    let location = config
        .table_location()
        .context("catalog section without a usable table location")?
        .to_string();
    let region = parse_region(&config)?;

    let registrar = CatalogRegistrar::new(
        region,
        &catalog.database,
        &catalog.table,
        location,
        &catalog.query_output_location,
    );

    registrar.ensure_database().await?;
    registrar.register_table().await?;
    println!(
        "{} Table {}.{} registered",
        CHECK,
        style(&catalog.database).bold(),
        style(&catalog.table).bold()
    );

    if cmd.repair {
        registrar.repair_partitions().await?;
        println!("{} Partitions repaired", CHECK);
    }

    Ok(())
}

fn print_definition(cmd: &DefinitionCommand) -> Result<()> {
    let config =
        PipelineConfig::from_file(&cmd.file).context("Failed to load pipeline config")?;
    let document = definition::state_machine(&config);

    if cmd.compact {
        println!("{}", serde_json::to_string(&document)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&document)?);
    }

    Ok(())
}
