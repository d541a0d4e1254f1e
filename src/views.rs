//! Read-only index views: latest, by tag, most read, read history, tag
//! catalog, and the combined home view.
//!
//! Each `run_*` function queries the service and prints plain text, one
//! record per line, so output can be piped into other tools. The home view
//! can also be printed as JSON.

use anyhow::{Context, Result};
use article_index_core::models::{ArticleId, HomeView, ReadCount};
use article_index_core::service::ArticleService;
use article_index_core::store::KeyValueStore;

pub async fn run_latest<S: KeyValueStore>(
    service: &ArticleService<S>,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(service.settings().capacity);
    let ids = service.latest(limit).await?;
    print!("{}", render_ids(&ids));
    Ok(())
}

pub async fn run_tag<S: KeyValueStore>(service: &ArticleService<S>, tag: &str) -> Result<()> {
    let ids = service.articles_by_tag(tag).await?;
    print!("{}", render_ids(&ids));
    Ok(())
}

pub async fn run_tags<S: KeyValueStore>(service: &ArticleService<S>) -> Result<()> {
    for tag in service.tags().await? {
        println!("{}", tag);
    }
    Ok(())
}

pub async fn run_top<S: KeyValueStore>(
    service: &ArticleService<S>,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(service.settings().top_k);
    let ranked = service.top_read(limit).await?;
    print!("{}", render_ranking(&ranked));
    Ok(())
}

pub async fn run_history<S: KeyValueStore>(
    service: &ArticleService<S>,
    user: &str,
    limit: Option<usize>,
) -> Result<()> {
    let limit = limit.unwrap_or(service.settings().capacity);
    let ids = service.history(user, limit).await?;
    print!("{}", render_ids(&ids));
    Ok(())
}

pub async fn run_home<S: KeyValueStore>(
    service: &ArticleService<S>,
    user: &str,
    json: bool,
) -> Result<HomeView> {
    let view = service
        .home_view(user)
        .await
        .context("Failed to load home view")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_home(user, &view));
    }
    Ok(view)
}

pub fn render_ids(ids: &[ArticleId]) -> String {
    ids.iter().map(|id| format!("{}\n", id)).collect()
}

pub fn render_ranking(ranked: &[ReadCount]) -> String {
    ranked
        .iter()
        .map(|r| format!("{}\t{}\n", r.id, r.reads))
        .collect()
}

pub fn render_home(user: &str, view: &HomeView) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- Home ({}) ---\n", user));

    out.push_str("\nLatest:\n");
    out.push_str(&indent_or_empty(&render_ids(&view.latest)));

    out.push_str("\nMost read:\n");
    out.push_str(&indent_or_empty(&render_ranking(&view.top_read)));

    out.push_str("\nRecently read:\n");
    out.push_str(&indent_or_empty(&render_ids(&view.history)));

    out.push_str("\nTags:\n");
    let tags = view.tags.iter().cloned().collect::<Vec<_>>().join(", ");
    out.push_str(&indent_or_empty(&tags));
    out
}

fn indent_or_empty(block: &str) -> String {
    if block.trim().is_empty() {
        return "  (none)\n".to_string();
    }
    block.lines().map(|line| format!("  {}\n", line)).collect()
}
