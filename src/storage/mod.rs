//! Object storage provisioning
//!
//! Bucket creation and file uploads happen out-of-band, before the
//! workflow runs; nothing here is reachable from inside a run.

use anyhow::{Context, Result};
use rusoto_core::{ByteStream, Region, RusotoError};
use rusoto_s3::{
    CreateBucketConfiguration, CreateBucketError, CreateBucketRequest, HeadBucketRequest,
    PutObjectRequest, S3Client, S3,
};
use std::path::Path;
use tracing::{info, warn};

/// S3-backed store for the pipeline's raw and reference data
pub struct ObjectStore {
    client: S3Client,
    region: Region,
    bucket: String,
}

impl ObjectStore {
    pub fn new(region: Region, bucket: impl Into<String>) -> Self {
        Self {
            client: S3Client::new(region.clone()),
            region,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Check whether the bucket exists and is accessible
    pub async fn bucket_exists(&self) -> bool {
        self.client
            .head_bucket(HeadBucketRequest {
                bucket: self.bucket.clone(),
                ..Default::default()
            })
            .await
            .is_ok()
    }

    /// Create the bucket if it does not already exist
    ///
    /// A bucket we already own is fine; a bucket owned by someone else is
    /// an error surfaced to the caller.
    pub async fn ensure_bucket(&self) -> Result<()> {
        if self.bucket_exists().await {
            info!(bucket = %self.bucket, "Bucket already exists");
            return Ok(());
        }

        // us-east-1 is the S3 default and must not be sent as a
        // location constraint.
        let configuration = match self.region.name() {
            "us-east-1" => None,
            name => Some(CreateBucketConfiguration {
                location_constraint: Some(name.to_string()),
            }),
        };

        let request = CreateBucketRequest {
            bucket: self.bucket.clone(),
            create_bucket_configuration: configuration,
            ..Default::default()
        };

        match self.client.create_bucket(request).await {
            Ok(_) => {
                info!(bucket = %self.bucket, region = %self.region.name(), "Bucket created");
                Ok(())
            }
            Err(RusotoError::Service(CreateBucketError::BucketAlreadyOwnedByYou(_))) => {
                warn!(bucket = %self.bucket, "Bucket already exists and is owned by you");
                Ok(())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to create bucket '{}'", self.bucket)),
        }
    }

    /// Upload a local file to the given object key
    pub async fn upload_file(&self, file_path: &Path, key: &str) -> Result<()> {
        let body = std::fs::read(file_path)
            .with_context(|| format!("Failed to read '{}'", file_path.display()))?;
        self.put_object(key, body).await?;
        info!(
            file = %file_path.display(),
            target = %format!("s3://{}/{}", self.bucket, key),
            "File uploaded"
        );
        Ok(())
    }

    /// Put an object, overwriting any existing one
    pub async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        self.client
            .put_object(PutObjectRequest {
                bucket: self.bucket.clone(),
                key: key.to_string(),
                body: Some(ByteStream::from(body)),
                ..Default::default()
            })
            .await
            .with_context(|| format!("Failed to put object 's3://{}/{}'", self.bucket, key))?;
        Ok(())
    }
}
