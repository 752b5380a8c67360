use chrono::Local;
use thiserror::Error;

use crate::model::WeatherReading;
use crate::store::{ObjectStore, StoreError};

const KEY_PREFIX: &str = "weather-data";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
const CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("nothing to archive: empty reading")]
    EmptyReading,

    #[error("failed to serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of the bucket check on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    AlreadyExists,
    Created,
}

/// Writes captured readings into a bucket, provisioning the bucket on first
/// use.
#[derive(Debug)]
pub struct Archiver {
    store: Box<dyn ObjectStore>,
    bucket: String,
    region: String,
}

impl Archiver {
    pub fn new(store: Box<dyn ObjectStore>, bucket: String, region: String) -> Self {
        Self {
            store,
            bucket,
            region,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Check the bucket and create it in the configured region when it is
    /// definitely absent. Any other check failure is surfaced without a
    /// creation attempt. Safe to call on every run.
    pub async fn ensure_bucket(&self) -> Result<BucketStatus, ArchiveError> {
        if self.store.bucket_exists(&self.bucket).await? {
            return Ok(BucketStatus::AlreadyExists);
        }

        self.store.create_bucket(&self.bucket, &self.region).await?;
        Ok(BucketStatus::Created)
    }

    /// Stamp the reading with the current local time and store it, returning
    /// the object key. Keys are unique at one-second granularity; two
    /// archives of the same city within the same second share a key and the
    /// later write silently overwrites the earlier one.
    pub async fn archive(
        &self,
        reading: &WeatherReading,
        city: &str,
    ) -> Result<String, ArchiveError> {
        if reading.is_empty() {
            return Err(ArchiveError::EmptyReading);
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let key = object_key(city, &timestamp);
        let body = reading.stamped_json(&timestamp)?;

        self.store
            .put_object(&self.bucket, &key, body.into_bytes(), CONTENT_TYPE)
            .await?;

        Ok(key)
    }
}

fn object_key(city: &str, timestamp: &str) -> String {
    format!("{KEY_PREFIX}/{city}--{timestamp}.json")
}
