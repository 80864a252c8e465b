use crate::retention::RetentionPlan;
use crate::storage::ObjectStore;
use crate::utils::{format_size, format_timestamp};
use anyhow::Result;

/// Prints the bucket newest first, marking what `prune --keep` would delete.
pub async fn list_objects(
    store: &dyn ObjectStore,
    keep: usize,
    verbose: bool,
) -> Result<RetentionPlan> {
    if verbose {
        println!("📄 Listing files in bucket {}", store.bucket());
        println!("  Keep: {}", keep);
    }

    let plan = RetentionPlan::keep_newest(store.list_objects().await?, keep);

    if plan.total() == 0 {
        println!("No files found");
        return Ok(plan);
    }

    println!("Found {} file(s):", plan.total());
    let rows = plan
        .retained
        .iter()
        .map(|r| ("keep", r))
        .chain(plan.expired.iter().map(|r| ("delete", r)));
    for (i, (action, object)) in rows.enumerate() {
        println!(
            "{}. [{}] {} ({}, modified: {})",
            i + 1,
            action,
            object.key,
            format_size(object.size.max(0) as u64),
            format_timestamp(&object.last_modified)
        );
    }
    println!(
        "{} would be kept, {} would be deleted",
        plan.retained.len(),
        plan.expired.len()
    );

    Ok(plan)
}
