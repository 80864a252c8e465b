use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::storage::{DeleteFailure, ObjectStore, MAX_BATCH_SIZE};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeletionReport {
    pub requested: usize,
    pub deleted: Vec<String>,
    pub failed: Vec<DeleteFailure>,
}

impl DeletionReport {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Submits `keys` to the store's batch delete and collects per-key outcomes.
///
/// An empty key set makes no request. Keys go out in chunks of
/// [`MAX_BATCH_SIZE`]. Failed keys are reported, never retried; only a
/// failed request aborts, and its error carries the counts from the batches
/// that already went through.
pub async fn delete_keys(store: &dyn ObjectStore, keys: &[String]) -> Result<DeletionReport> {
    let mut report = DeletionReport {
        requested: keys.len(),
        ..Default::default()
    };

    if keys.is_empty() {
        debug!(bucket = store.bucket(), "no keys to delete, skipping DeleteObjects");
        return Ok(report);
    }

    for chunk in keys.chunks(MAX_BATCH_SIZE) {
        let outcome = store.delete_objects(chunk).await.with_context(|| {
            format!(
                "Deletion aborted after {} of {} object(s) were deleted ({} failed)",
                report.deleted.len(),
                report.requested,
                report.failed.len()
            )
        })?;
        for failure in &outcome.errors {
            warn!(
                bucket = store.bucket(),
                key = %failure.key,
                code = %failure.code,
                "failed to delete object: {}",
                failure.message
            );
        }
        report.deleted.extend(outcome.deleted);
        report.failed.extend(outcome.errors);
    }

    Ok(report)
}
