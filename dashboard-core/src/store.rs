use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use thiserror::Error;

/// Storage failures, tagged by the operation that produced them so the
/// caller can report provisioning and write problems separately.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bucket check failed: {0}")]
    Check(String),

    #[error("bucket creation failed: {0}")]
    Create(String),

    #[error("object write failed: {0}")]
    Write(String),
}

/// Object-storage seam used by the archiver. Production code goes through
/// S3; tests substitute an in-memory double.
#[async_trait]
pub trait ObjectStore: Send + Sync + Debug {
    /// `Ok(false)` means the bucket definitely does not exist. Any other
    /// check failure (permissions, transport) is an error and must not be
    /// treated as "absent".
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError>;

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;
}

/// S3-backed store using the default AWS credential chain.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    pub async fn from_env(region: &str) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_owned()))
            .load()
            .await;

        Self {
            client: Client::new(&shared),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    Ok(false)
                } else {
                    Err(StoreError::Check(DisplayErrorContext(&err).to_string()))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<(), StoreError> {
        let location = CreateBucketConfiguration::builder()
            .location_constraint(BucketLocationConstraint::from(region))
            .build();

        self.client
            .create_bucket()
            .bucket(bucket)
            .create_bucket_configuration(location)
            .send()
            .await
            .map_err(|err| StoreError::Create(DisplayErrorContext(&err).to_string()))?;

        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|err| StoreError::Write(DisplayErrorContext(&err).to_string()))?;

        Ok(())
    }
}
