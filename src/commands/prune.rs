use anyhow::Result;

use super::{execute_plan, RunOptions, RunSummary};
use crate::retention::RetentionPlan;
use crate::storage::ObjectStore;

/// Keeps the `keep` most recently modified objects and deletes the rest.
pub async fn prune_bucket(
    store: &dyn ObjectStore,
    keep: usize,
    options: RunOptions,
) -> Result<RunSummary> {
    if options.verbose {
        println!("📄 Listing objects in bucket {}", store.bucket());
        println!("  Keeping newest: {}", keep);
    }

    let records = store.list_objects().await?;
    let plan = RetentionPlan::keep_newest(records, keep);

    if plan.is_noop() {
        println!(
            "Nothing to delete: {} object(s) found, keeping up to {}",
            plan.total(),
            keep
        );
        return Ok(RunSummary {
            found: plan.total(),
            retained: plan.retained.len(),
            dry_run: options.dry_run,
            ..Default::default()
        });
    }

    if !options.dry_run {
        println!(
            "🗑️ Deleting {} old object(s) out of {}...",
            plan.expired.len(),
            plan.total()
        );
    }
    if options.verbose {
        for kept in &plan.retained {
            println!("  📌 keeping {}", kept.key);
        }
    }
    execute_plan(store, &plan, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{record, MockStore};

    #[tokio::test]
    async fn count_at_keep_is_a_noop() {
        let store = MockStore::new(vec![record("A", 3), record("B", 2), record("C", 1)]);
        let summary = prune_bucket(&store, 3, RunOptions::default()).await.unwrap();

        assert_eq!(summary.found, 3);
        assert_eq!(summary.retained, 3);
        assert_eq!(store.delete_calls(), 0);
    }

    #[tokio::test]
    async fn deletes_only_the_oldest() {
        let store = MockStore::new(vec![
            record("A", 4),
            record("B", 3),
            record("C", 2),
            record("D", 1),
        ]);
        let summary = prune_bucket(&store, 3, RunOptions::default()).await.unwrap();

        assert_eq!(summary.report.deleted, vec!["D".to_string()]);
        assert_eq!(
            store.remaining_keys(),
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );
    }

    #[tokio::test]
    async fn keep_zero_behaves_like_purge() {
        let store = MockStore::new(vec![record("x", 1), record("y", 2)]);
        let summary = prune_bucket(&store, 0, RunOptions::default()).await.unwrap();

        assert_eq!(summary.report.deleted.len(), 2);
        assert!(store.remaining_keys().is_empty());
    }

    #[tokio::test]
    async fn repeated_prune_converges() {
        let store = MockStore::new((0..10).map(|i| record(&format!("backup-{i}"), i)).collect());

        prune_bucket(&store, 3, RunOptions::default()).await.unwrap();
        let second = prune_bucket(&store, 3, RunOptions::default()).await.unwrap();

        assert_eq!(second.found, 3);
        assert_eq!(second.report.requested, 0);
        assert_eq!(store.delete_calls(), 1);
        assert_eq!(
            store.remaining_keys(),
            vec![
                "backup-7".to_string(),
                "backup-8".to_string(),
                "backup-9".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn dry_run_reports_without_deleting() {
        let store = MockStore::new(vec![record("new", 2), record("old", 1)]);
        let options = RunOptions {
            dry_run: true,
            verbose: true,
        };
        let summary = prune_bucket(&store, 1, options).await.unwrap();

        assert_eq!((summary.found, summary.retained), (2, 1));
        assert!(summary.dry_run);
        assert_eq!(summary.report.requested, 1);
        assert_eq!(store.delete_calls(), 0);
        assert_eq!(store.remaining_keys().len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_request_is_fatal() {
        let store =
            MockStore::new(vec![record("new", 2), record("old", 1)]).with_failing_delete();
        assert!(prune_bucket(&store, 1, RunOptions::default()).await.is_err());
    }
}
