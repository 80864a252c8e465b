//! Listing and batch deletion against the bucket.
//!
//! [`ObjectStore`] is the seam between the purge commands and the S3 SDK, so
//! the retention and deletion logic can run against an in-memory store in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::operation::delete_objects::DeleteObjectsOutput;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::primitives::DateTime;
use aws_sdk_s3::types::{Delete, Object, ObjectIdentifier};
use aws_sdk_s3::Client;
use std::future::Future;
use tracing::{debug, warn};

/// Maximum keys accepted by one DeleteObjects call.
pub const MAX_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub key: String,
    pub last_modified: DateTime,
    pub size: i64,
}

impl ObjectRecord {
    pub fn new(key: impl Into<String>, last_modified: DateTime, size: i64) -> Self {
        Self {
            key: key.into(),
            last_modified,
            size,
        }
    }

    /// Ordering key for `last_modified`.
    pub fn modified_at(&self) -> (i64, u32) {
        (self.last_modified.secs(), self.last_modified.subsec_nanos())
    }

    /// Converts a listed object. Entries without a key are dropped and a
    /// missing timestamp counts as the epoch.
    pub fn from_listed(object: &Object) -> Option<Self> {
        let key = object.key()?;
        let last_modified = object
            .last_modified()
            .copied()
            .unwrap_or_else(|| DateTime::from_secs(0));
        Some(Self::new(key, last_modified, object.size().unwrap_or(0)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFailure {
    pub key: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub errors: Vec<DeleteFailure>,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// Lists every object, following continuation tokens until the listing
    /// is exhausted. Any failure aborts the listing.
    async fn list_objects(&self) -> Result<Vec<ObjectRecord>>;

    /// Issues one batch delete for at most [`MAX_BATCH_SIZE`] keys.
    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteOutcome>;
}

pub struct S3Store {
    client: Client,
    bucket: String,
    prefix: Option<String>,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>, prefix: Option<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix,
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self) -> Result<Vec<ObjectRecord>> {
        list_all_pages(&self.bucket, |continuation_token| {
            let request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .set_prefix(self.prefix.clone())
                .set_continuation_token(continuation_token);
            let bucket = self.bucket.clone();
            async move {
                request
                    .send()
                    .await
                    .with_context(|| format!("Failed to list objects in bucket {}", bucket))
            }
        })
        .await
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<DeleteOutcome> {
        let identifiers = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<Result<Vec<_>, _>>()?;
        let delete = Delete::builder().set_objects(Some(identifiers)).build()?;

        debug!(bucket = %self.bucket, batch_size = keys.len(), "sending DeleteObjects request");

        let response = self
            .client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .with_context(|| format!("DeleteObjects request to bucket {} failed", self.bucket))?;

        Ok(outcome_from_response(&response))
    }
}

/// Drives ListObjectsV2 pagination. `fetch` receives the continuation token
/// for each request, `None` for the first page.
pub(crate) async fn list_all_pages<F, Fut>(
    bucket: &str,
    mut fetch: F,
) -> Result<Vec<ObjectRecord>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListObjectsV2Output>>,
{
    let mut records = Vec::new();
    let mut continuation_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let output = fetch(continuation_token.take()).await?;
        pages += 1;

        for object in output.contents() {
            match ObjectRecord::from_listed(object) {
                Some(record) => records.push(record),
                None => warn!(bucket, "skipping listed object without a key"),
            }
        }

        if output.is_truncated() != Some(true) {
            break;
        }
        continuation_token = output.next_continuation_token().map(String::from);
        if continuation_token.is_none() {
            warn!(bucket, "truncated listing without a continuation token");
            break;
        }
    }

    debug!(bucket, pages, objects = records.len(), "listing complete");
    Ok(records)
}

fn outcome_from_response(response: &DeleteObjectsOutput) -> DeleteOutcome {
    let deleted = response
        .deleted()
        .iter()
        .filter_map(|deleted| deleted.key().map(String::from))
        .collect();
    let errors = response
        .errors()
        .iter()
        .map(|err| DeleteFailure {
            key: err.key().unwrap_or("unknown").to_string(),
            code: err.code().unwrap_or("unknown").to_string(),
            message: err.message().unwrap_or("no message").to_string(),
        })
        .collect();
    DeleteOutcome { deleted, errors }
}
