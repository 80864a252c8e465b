use anyhow::Result;

use super::{execute_plan, RunOptions, RunSummary};
use crate::retention::RetentionPlan;
use crate::storage::ObjectStore;

/// Deletes every object in the bucket.
pub async fn purge_bucket(store: &dyn ObjectStore, options: RunOptions) -> Result<RunSummary> {
    if options.verbose {
        println!("📄 Listing objects in bucket {}", store.bucket());
    }

    let records = store.list_objects().await?;
    let plan = RetentionPlan::expire_all(records);

    if plan.is_noop() {
        println!("Bucket {} is empty, nothing to delete", store.bucket());
        return Ok(RunSummary {
            dry_run: options.dry_run,
            ..Default::default()
        });
    }

    if !options.dry_run {
        println!(
            "🗑️ Deleting all {} object(s) from {}...",
            plan.total(),
            store.bucket()
        );
    }
    execute_plan(store, &plan, options).await
}
