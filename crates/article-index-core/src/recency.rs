//! Bounded newest-first lists: the global latest list and per-user read
//! history.
//!
//! Both are a prepend followed by a trim to the first `capacity` entries.
//! The two commands are individually atomic but not paired, so concurrent
//! pushes may briefly leave a list longer than `capacity`; the next trim
//! restores the bound, and the newest `capacity` entries always survive.

use std::sync::Arc;

use tracing::debug;

use crate::keys;
use crate::models::ArticleId;
use crate::store::{KeyValueStore, StoreResult};

struct BoundedList<S> {
    store: Arc<S>,
    capacity: usize,
}

impl<S> Clone for BoundedList<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            capacity: self.capacity,
        }
    }
}

impl<S: KeyValueStore> BoundedList<S> {
    async fn push(&self, key: &str, id: ArticleId) -> StoreResult<()> {
        self.store.list_push(key, &id.to_string()).await?;
        self.store.list_trim(key, self.capacity).await
    }

    async fn range(&self, key: &str, limit: usize) -> StoreResult<Vec<ArticleId>> {
        let limit = limit.min(self.capacity);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.store
            .list_range(key, limit)
            .await?
            .iter()
            .map(|raw| keys::parse_article_id(key, raw))
            .collect()
    }
}

/// Global latest-published list (`articles:latest`).
pub struct RecencyIndex<S> {
    list: BoundedList<S>,
}

impl<S> Clone for RecencyIndex<S> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<S: KeyValueStore> RecencyIndex<S> {
    /// `capacity` is the bound `N`; values below 1 are raised to 1.
    pub fn new(store: Arc<S>, capacity: usize) -> Self {
        Self {
            list: BoundedList {
                store,
                capacity: capacity.max(1),
            },
        }
    }

    pub fn capacity(&self) -> usize {
        self.list.capacity
    }

    pub async fn push(&self, id: ArticleId) -> StoreResult<()> {
        self.list.push(keys::LATEST_ARTICLES, id).await?;
        debug!(article_id = %id, "latest list updated");
        Ok(())
    }

    /// Newest first, at most `min(limit, capacity)` ids.
    pub async fn latest(&self, limit: usize) -> StoreResult<Vec<ArticleId>> {
        self.list.range(keys::LATEST_ARTICLES, limit).await
    }

    /// Replace the list with `ids` (newest first), keeping at most `capacity`.
    pub(crate) async fn rebuild(&self, ids: &[ArticleId]) -> StoreResult<()> {
        self.list.store.delete(keys::LATEST_ARTICLES).await?;
        for id in ids.iter().take(self.list.capacity).rev() {
            self.list.push(keys::LATEST_ARTICLES, *id).await?;
        }
        Ok(())
    }
}

/// Per-user read history (`user:{user}:lastread`).
///
/// Re-reading an article pushes it again; duplicates are kept.
pub struct UserHistoryIndex<S> {
    list: BoundedList<S>,
}

impl<S> Clone for UserHistoryIndex<S> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<S: KeyValueStore> UserHistoryIndex<S> {
    pub fn new(store: Arc<S>, capacity: usize) -> Self {
        Self {
            list: BoundedList {
                store,
                capacity: capacity.max(1),
            },
        }
    }

    pub async fn push(&self, user_id: &str, id: ArticleId) -> StoreResult<()> {
        self.list.push(&keys::user_last_read(user_id), id).await?;
        debug!(user = user_id, article_id = %id, "read history updated");
        Ok(())
    }

    pub async fn history(&self, user_id: &str, limit: usize) -> StoreResult<Vec<ArticleId>> {
        self.list.range(&keys::user_last_read(user_id), limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn ids(values: &[u64]) -> Vec<ArticleId> {
        values.iter().copied().map(ArticleId).collect()
    }

    #[tokio::test]
    async fn test_latest_keeps_newest_n() {
        let recency = RecencyIndex::new(Arc::new(InMemoryStore::new()), 5);
        for id in 1..=6 {
            recency.push(ArticleId(id)).await.unwrap();
        }
        assert_eq!(recency.latest(5).await.unwrap(), ids(&[6, 5, 4, 3, 2]));
        assert_eq!(recency.latest(2).await.unwrap(), ids(&[6, 5]));
    }

    #[tokio::test]
    async fn test_latest_limit_clamped_to_capacity() {
        let store = Arc::new(InMemoryStore::new());
        let recency = RecencyIndex::new(Arc::clone(&store), 3);
        for id in 1..=4 {
            recency.push(ArticleId(id)).await.unwrap();
        }
        assert_eq!(recency.latest(100).await.unwrap(), ids(&[4, 3, 2]));
        assert!(recency.latest(0).await.unwrap().is_empty());
        assert_eq!(store.list_range(keys::LATEST_ARTICLES, 100).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised_to_one() {
        let recency = RecencyIndex::new(Arc::new(InMemoryStore::new()), 0);
        assert_eq!(recency.capacity(), 1);
        recency.push(ArticleId(1)).await.unwrap();
        recency.push(ArticleId(2)).await.unwrap();
        assert_eq!(recency.latest(5).await.unwrap(), ids(&[2]));
    }

    #[tokio::test]
    async fn test_rebuild_replaces_list() {
        let recency = RecencyIndex::new(Arc::new(InMemoryStore::new()), 3);
        recency.push(ArticleId(99)).await.unwrap();
        recency.rebuild(&ids(&[9, 8, 7, 6])).await.unwrap();
        assert_eq!(recency.latest(3).await.unwrap(), ids(&[9, 8, 7]));
    }

    #[tokio::test]
    async fn test_history_keeps_duplicates_per_user() {
        let store = Arc::new(InMemoryStore::new());
        let history = UserHistoryIndex::new(store, 5);
        history.push("alice", ArticleId(1)).await.unwrap();
        history.push("alice", ArticleId(1)).await.unwrap();
        history.push("bob", ArticleId(2)).await.unwrap();
        assert_eq!(history.history("alice", 5).await.unwrap(), ids(&[1, 1]));
        assert_eq!(history.history("bob", 5).await.unwrap(), ids(&[2]));
        assert!(history.history("carol", 5).await.unwrap().is_empty());
    }
}
