//! Article retrieval by id.
//!
//! `articles read` fetches an article on behalf of a user and records the
//! read; `articles get` fetches without recording anything. A missing
//! article surfaces as [`ArticleError::NotFound`] so the caller can render
//! a not-found state distinct from a storage failure.

use anyhow::Result;
use article_index_core::error::ArticleError;
use article_index_core::models::{Article, ArticleId};
use article_index_core::service::ArticleService;
use article_index_core::store::KeyValueStore;

/// Fetch `id` for `user`, count the read, and print the article.
pub async fn run_read<S: KeyValueStore>(
    service: &ArticleService<S>,
    id: ArticleId,
    user: &str,
) -> Result<Article> {
    let article = service.record_read_and_fetch(id, user).await?;
    print!("{}", render_article(&article));
    Ok(article)
}

/// Fetch and print `id` without recording a read.
pub async fn run_get<S: KeyValueStore>(
    service: &ArticleService<S>,
    id: ArticleId,
) -> Result<Article, ArticleError> {
    let article = service.get_article(id).await?;
    print!("{}", render_article(&article));
    Ok(article)
}

pub fn render_article(article: &Article) -> String {
    let tags = if article.tags.is_empty() {
        "(none)".to_string()
    } else {
        article.tags.iter().cloned().collect::<Vec<_>>().join(", ")
    };

    let mut out = String::new();
    out.push_str("--- Article ---\n");
    out.push_str(&format!("id:   {}\n", article.id));
    out.push_str(&format!("tags: {}\n", tags));
    out.push('\n');
    out.push_str(&article.body);
    out.push('\n');
    out
}
