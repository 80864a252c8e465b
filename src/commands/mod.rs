pub mod list;
pub mod prune;
pub mod purge;

use anyhow::Result;

use crate::deleter::{delete_keys, DeletionReport};
use crate::retention::RetentionPlan;
use crate::storage::ObjectStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub retained: usize,
    pub report: DeletionReport,
    pub dry_run: bool,
}

/// Deletes the plan's expired keys, or only prints them in dry-run mode.
async fn execute_plan(
    store: &dyn ObjectStore,
    plan: &RetentionPlan,
    options: RunOptions,
) -> Result<RunSummary> {
    let keys = plan.expired_keys();
    let mut summary = RunSummary {
        found: plan.total(),
        retained: plan.retained.len(),
        dry_run: options.dry_run,
        ..Default::default()
    };

    if options.dry_run {
        for key in &keys {
            println!("  {}", key);
        }
        summary.report.requested = keys.len();
        print_summary(&summary);
        return Ok(summary);
    }

    if options.verbose {
        for key in &keys {
            println!("  🗑️ {}", key);
        }
    }

    summary.report = delete_keys(store, &keys).await?;
    print_summary(&summary);
    Ok(summary)
}

pub fn print_summary(summary: &RunSummary) {
    print!("{}", summary_lines(summary));
}

fn summary_lines(summary: &RunSummary) -> String {
    let report = &summary.report;
    let mut out = format!(
        "📊 Found {} object(s), keeping {}\n",
        summary.found, summary.retained
    );
    if summary.dry_run {
        out.push_str(&format!(
            "🔍 Dry run: would delete {} object(s)\n",
            report.requested
        ));
        return out;
    }
    out.push_str(&format!("✅ Deleted {} object(s)\n", report.deleted.len()));
    if report.has_failures() {
        out.push_str(&format!(
            "❌ Failed to delete {} object(s)\n",
            report.failed.len()
        ));
        for failure in &report.failed {
            out.push_str(&format!(
                "  Key: {}, error: {}\n",
                failure.key, failure.message
            ));
        }
    }
    out
}
