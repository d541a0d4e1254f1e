//! Article publishing.
//!
//! Used by the `articles publish` command. The tag field is free-form
//! (`"go, rust"`) and normalized by the service.

use anyhow::{Context, Result};
use article_index_core::models::ArticleId;
use article_index_core::service::ArticleService;
use article_index_core::store::KeyValueStore;

/// Publish one article and print its id.
pub async fn run_publish<S: KeyValueStore>(
    service: &ArticleService<S>,
    text: &str,
    tags: &str,
) -> Result<ArticleId> {
    let id = service
        .publish(text, tags)
        .await
        .context("Failed to publish article")?;

    println!("{}", id);
    Ok(id)
}
