//! Index reconciliation.
//!
//! Publishing updates the tag index and latest list best-effort, so an
//! interrupted publish can leave an article stored but unindexed.
//! `articles reconcile` rebuilds both from the stored articles.

use anyhow::{Context, Result};
use article_index_core::models::ReconcileReport;
use article_index_core::service::ArticleService;
use article_index_core::store::KeyValueStore;

pub async fn run_reconcile<S: KeyValueStore>(
    service: &ArticleService<S>,
) -> Result<ReconcileReport> {
    let report = service
        .reconcile()
        .await
        .context("Reconcile aborted")?;

    println!("reconcile finished");
    println!("  scanned ids:      {}", report.scanned);
    println!("  indexed articles: {}", report.indexed);
    println!("  missing articles: {}", report.missing);
    let latest: Vec<String> = report.latest.iter().map(|id| id.to_string()).collect();
    println!("  latest:           {}", latest.join(" "));
    Ok(report)
}
