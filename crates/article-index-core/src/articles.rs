//! Raw article content: bodies and per-article tag sets.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ArticleError, ArticleResult};
use crate::keys;
use crate::models::{Article, ArticleId};
use crate::store::{KeyValueStore, StoreError, StoreResult};

/// Owns `articles:{id}` and `articles:{id}:tags`.
pub struct ArticleStore<S> {
    store: Arc<S>,
}

impl<S> Clone for ArticleStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> ArticleStore<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Allocate a new id and store the body, then the tag set.
    ///
    /// Writes are independent commands. If the tag write fails the body stays
    /// behind under the allocated id; nothing is rolled back.
    pub async fn create(&self, body: &str, tags: &BTreeSet<String>) -> StoreResult<ArticleId> {
        let id = ArticleId(self.store.incr(keys::NEXT_ARTICLE_ID).await?);
        self.store.set(&keys::article_body(id), body).await?;

        let members: Vec<String> = tags.iter().cloned().collect();
        self.store.set_add(&keys::article_tags(id), &members).await?;

        debug!(article_id = %id, tags = members.len(), "article stored");
        Ok(id)
    }

    /// Fetch body and tags. An absent body is [`ArticleError::NotFound`].
    pub async fn get(&self, id: ArticleId) -> ArticleResult<Article> {
        let body = match self.store.get(&keys::article_body(id)).await? {
            Some(body) => body,
            None => return Err(ArticleError::NotFound(id)),
        };
        let tags = self.store.set_members(&keys::article_tags(id)).await?;
        Ok(Article { id, body, tags })
    }

    /// Highest id handed out so far; `0` before the first publish.
    pub async fn last_allocated(&self) -> StoreResult<u64> {
        match self.store.get(keys::NEXT_ARTICLE_ID).await? {
            None => Ok(0),
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                StoreError::invalid_data(keys::NEXT_ARTICLE_ID, format!("`{raw}`: {e}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn tag_set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let articles = ArticleStore::new(Arc::new(InMemoryStore::new()));
        let id = articles
            .create("hello world", &tag_set(&["go", "rust"]))
            .await
            .unwrap();
        let article = articles.get(id).await.unwrap();
        assert_eq!(article.id, id);
        assert_eq!(article.body, "hello world");
        assert_eq!(article.tags, tag_set(&["go", "rust"]));
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() {
        let articles = ArticleStore::new(Arc::new(InMemoryStore::new()));
        let a = articles.create("a", &BTreeSet::new()).await.unwrap();
        let b = articles.create("b", &BTreeSet::new()).await.unwrap();
        assert!(b > a);
        assert_eq!(articles.last_allocated().await.unwrap(), b.0);
    }

    #[tokio::test]
    async fn test_untagged_article_has_empty_tags() {
        let articles = ArticleStore::new(Arc::new(InMemoryStore::new()));
        let id = articles.create("plain", &BTreeSet::new()).await.unwrap();
        assert!(articles.get(id).await.unwrap().tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_article_is_not_found() {
        let articles = ArticleStore::new(Arc::new(InMemoryStore::new()));
        let err = articles.get(ArticleId(9999999)).await.unwrap_err();
        assert!(matches!(err, ArticleError::NotFound(ArticleId(9999999))));
    }

    #[tokio::test]
    async fn test_corrupt_counter_is_invalid_data() {
        let store = Arc::new(InMemoryStore::new());
        store.set(keys::NEXT_ARTICLE_ID, "soon").await.unwrap();
        let articles = ArticleStore::new(store);
        assert!(matches!(
            articles.last_allocated().await,
            Err(StoreError::InvalidData { .. })
        ));
    }
}
