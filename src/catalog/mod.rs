//! Query catalog registration
//!
//! After a successful transform, the Parquet output is registered in the
//! Glue Data Catalog so Athena can query it. This runs out-of-band, after
//! the workflow; it is not a state in the orchestration machine.
//!
//! The Athena path is the authoritative destination here. The original
//! design also sketched a Redshift load, but left it unconfigured.

use anyhow::{bail, Context, Result};
use rusoto_athena::{
    Athena, AthenaClient, GetQueryExecutionInput, QueryExecutionContext, ResultConfiguration,
    StartQueryExecutionInput,
};
use rusoto_core::{Region, RusotoError};
use rusoto_glue::{
    Column, CreateDatabaseRequest, CreateTableRequest, DatabaseInput, GetDatabaseError,
    GetDatabaseRequest, Glue, GlueClient, SerDeInfo, StorageDescriptor, TableInput,
    UpdateTableError, UpdateTableRequest,
};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

const PARQUET_INPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.parquet.MapredParquetInputFormat";
const PARQUET_OUTPUT_FORMAT: &str =
    "org.apache.hadoop.hive.ql.io.parquet.MapredParquetOutputFormat";
const PARQUET_SERDE: &str = "org.apache.hadoop.hive.ql.io.parquet.serde.ParquetHiveSerDe";

/// Athena query execution states that end the wait
const QUERY_TERMINAL_STATES: [&str; 3] = ["SUCCEEDED", "FAILED", "CANCELLED"];

/// Registers the transformed output as an external table and makes its
/// partitions visible to Athena.
pub struct CatalogRegistrar {
    glue: GlueClient,
    athena: AthenaClient,
    database: String,
    table: String,
    location: String,
    query_output_location: String,
    poll_interval: Duration,
}

impl CatalogRegistrar {
    pub fn new(
        region: Region,
        database: impl Into<String>,
        table: impl Into<String>,
        location: impl Into<String>,
        query_output_location: impl Into<String>,
    ) -> Self {
        Self {
            glue: GlueClient::new(region.clone()),
            athena: AthenaClient::new(region),
            database: database.into(),
            table: table.into(),
            location: location.into(),
            query_output_location: query_output_location.into(),
            poll_interval: Duration::from_secs(5),
        }
    }

    /// Create the Glue database if it does not exist
    pub async fn ensure_database(&self) -> Result<()> {
        let found = self
            .glue
            .get_database(GetDatabaseRequest {
                name: self.database.clone(),
                ..Default::default()
            })
            .await;

        match found {
            Ok(_) => {
                info!(database = %self.database, "Glue database already exists");
                return Ok(());
            }
            Err(RusotoError::Service(GetDatabaseError::EntityNotFound(_))) => {}
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to check database '{}'", self.database))
            }
        }

        self.glue
            .create_database(CreateDatabaseRequest {
                database_input: DatabaseInput {
                    name: self.database.clone(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .await
            .with_context(|| format!("Failed to create database '{}'", self.database))?;

        info!(database = %self.database, "Glue database created");
        Ok(())
    }

    /// Create or update the external Parquet table for the transformed
    /// output, partitioned by load date
    pub async fn register_table(&self) -> Result<()> {
        let table_input = self.table_input();

        let updated = self
            .glue
            .update_table(UpdateTableRequest {
                database_name: self.database.clone(),
                table_input: table_input.clone(),
                ..Default::default()
            })
            .await;

        match updated {
            Ok(_) => {
                info!(table = %self.qualified_table(), "Glue table updated");
                return Ok(());
            }
            Err(RusotoError::Service(UpdateTableError::EntityNotFound(_))) => {
                info!(table = %self.qualified_table(), "Glue table not found, creating");
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to update table '{}'", self.qualified_table()))
            }
        }

        self.glue
            .create_table(CreateTableRequest {
                database_name: self.database.clone(),
                table_input,
                ..Default::default()
            })
            .await
            .with_context(|| format!("Failed to create table '{}'", self.qualified_table()))?;

        info!(table = %self.qualified_table(), "Glue table created");
        Ok(())
    }

    /// Run MSCK REPAIR TABLE through Athena so newly written load_date
    /// partitions become queryable, and wait for the query to finish
    pub async fn repair_partitions(&self) -> Result<()> {
        let query = format!("MSCK REPAIR TABLE `{}`.`{}`;", self.database, self.table);
        info!(table = %self.qualified_table(), "Running MSCK REPAIR TABLE");

        let started = self
            .athena
            .start_query_execution(StartQueryExecutionInput {
                query_string: query,
                query_execution_context: Some(QueryExecutionContext {
                    database: Some(self.database.clone()),
                    ..Default::default()
                }),
                result_configuration: Some(ResultConfiguration {
                    output_location: Some(self.query_output_location.clone()),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await
            .context("Failed to start MSCK REPAIR TABLE query")?;

        let execution_id = started
            .query_execution_id
            .context("Athena returned no query execution id")?;

        loop {
            let response = self
                .athena
                .get_query_execution(GetQueryExecutionInput {
                    query_execution_id: execution_id.clone(),
                })
                .await
                .context("Failed to get query execution state")?;

            let status = response
                .query_execution
                .and_then(|q| q.status)
                .context("Athena returned no query status")?;
            let state = status.state.unwrap_or_default();

            if QUERY_TERMINAL_STATES.contains(&state.as_str()) {
                if state != "SUCCEEDED" {
                    let reason = status
                        .state_change_reason
                        .unwrap_or_else(|| "no reason provided".to_string());
                    warn!(%state, %reason, "MSCK REPAIR TABLE did not succeed");
                    bail!("MSCK REPAIR TABLE finished with state {}: {}", state, reason);
                }
                info!("MSCK REPAIR TABLE succeeded");
                return Ok(());
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    fn qualified_table(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }

    /// Table definition matching the transform job's output schema
    fn table_input(&self) -> TableInput {
        let columns = [
            ("transaction_id", "string"),
            ("user_id", "string"),
            ("product_id", "string"),
            ("category", "string"),
            ("amount", "float"),
            ("currency", "string"),
            ("amount_usd", "float"),
            ("timestamp", "timestamp"),
            ("transaction_date", "date"),
            ("transaction_year", "int"),
            ("transaction_month", "int"),
            ("transaction_week", "int"),
            ("transaction_day", "int"),
        ]
        .iter()
        .map(|(name, type_)| Column {
            name: name.to_string(),
            type_: Some(type_.to_string()),
            ..Default::default()
        })
        .collect();

        let partition_keys = vec![Column {
            name: "load_date".to_string(),
            type_: Some("date".to_string()),
            ..Default::default()
        }];

        let mut serde_parameters = HashMap::new();
        serde_parameters.insert("serialization.format".to_string(), "1".to_string());

        let mut table_parameters = HashMap::new();
        table_parameters.insert("classification".to_string(), "parquet".to_string());

        TableInput {
            name: self.table.clone(),
            storage_descriptor: Some(StorageDescriptor {
                columns: Some(columns),
                location: Some(self.location.clone()),
                input_format: Some(PARQUET_INPUT_FORMAT.to_string()),
                output_format: Some(PARQUET_OUTPUT_FORMAT.to_string()),
                serde_info: Some(SerDeInfo {
                    serialization_library: Some(PARQUET_SERDE.to_string()),
                    parameters: Some(serde_parameters),
                    ..Default::default()
                }),
                // Parquet handles compression internally
                compressed: Some(false),
                number_of_buckets: Some(-1),
                stored_as_sub_directories: Some(false),
                ..Default::default()
            }),
            partition_keys: Some(partition_keys),
            table_type: Some("EXTERNAL_TABLE".to_string()),
            parameters: Some(table_parameters),
            ..Default::default()
        }
    }
}
