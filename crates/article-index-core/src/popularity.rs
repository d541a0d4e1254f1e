//! Read-count ranking (`articles:reads`).
//!
//! Counts only ever go up: each read adds exactly one and nothing resets
//! them. Ties are ordered by the store; for Redis and [`InMemoryStore`]
//! that is descending lexicographic order of the decimal id.
//!
//! [`InMemoryStore`]: crate::store::memory::InMemoryStore

use std::sync::Arc;

use tracing::debug;

use crate::keys;
use crate::models::{ArticleId, ReadCount};
use crate::store::{KeyValueStore, StoreResult};

pub struct PopularityIndex<S> {
    store: Arc<S>,
}

impl<S> Clone for PopularityIndex<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> PopularityIndex<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Count one read of `id`, returning its new total.
    pub async fn increment(&self, id: ArticleId) -> StoreResult<u64> {
        let reads = self
            .store
            .zset_incr(keys::ARTICLE_READS, &id.to_string(), 1)
            .await?;
        debug!(article_id = %id, reads, "read counted");
        Ok(reads)
    }

    /// The `k` most-read articles, highest count first.
    pub async fn top_k(&self, k: usize) -> StoreResult<Vec<ReadCount>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        self.store
            .zset_rev_range(keys::ARTICLE_READS, k)
            .await?
            .into_iter()
            .map(|(member, reads)| {
                Ok(ReadCount {
                    id: keys::parse_article_id(keys::ARTICLE_READS, &member)?,
                    reads,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn test_increment_counts_reads() {
        let popularity = PopularityIndex::new(Arc::new(InMemoryStore::new()));
        assert_eq!(popularity.increment(ArticleId(3)).await.unwrap(), 1);
        assert_eq!(popularity.increment(ArticleId(3)).await.unwrap(), 2);
        popularity.increment(ArticleId(4)).await.unwrap();

        let top = popularity.top_k(1).await.unwrap();
        assert_eq!(top, vec![ReadCount { id: ArticleId(3), reads: 2 }]);
    }

    #[tokio::test]
    async fn test_top_k_is_non_increasing() {
        let popularity = PopularityIndex::new(Arc::new(InMemoryStore::new()));
        let reads = [(1, 2), (2, 5), (3, 1), (4, 5), (5, 3)];
        for (id, n) in reads {
            for _ in 0..n {
                popularity.increment(ArticleId(id)).await.unwrap();
            }
        }

        let top = popularity.top_k(10).await.unwrap();
        assert_eq!(top.len(), 5);
        assert!(top.windows(2).all(|w| w[0].reads >= w[1].reads));
        // ties: descending member order
        assert_eq!(top[0].id, ArticleId(4));
        assert_eq!(top[1].id, ArticleId(2));
    }

    #[tokio::test]
    async fn test_top_k_zero_and_empty() {
        let popularity = PopularityIndex::new(Arc::new(InMemoryStore::new()));
        assert!(popularity.top_k(5).await.unwrap().is_empty());
        popularity.increment(ArticleId(1)).await.unwrap();
        assert!(popularity.top_k(0).await.unwrap().is_empty());
    }
}
