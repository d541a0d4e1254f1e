//! Inverted tag index.
//!
//! For every tag, the set of article ids carrying it (`tags:{tag}:articles`),
//! plus the catalog of every tag ever indexed (`tags`). The catalog only
//! grows: nothing in this crate removes a tag once added.
//!
//! Indexing also writes the reverse mapping `articles:{id}:tags`, the same
//! key [`ArticleStore`](crate::articles::ArticleStore) writes at creation.
//! Set adds are idempotent, so re-indexing an article is always safe.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::keys;
use crate::models::ArticleId;
use crate::store::{KeyValueStore, StoreResult};

pub struct TagIndex<S> {
    store: Arc<S>,
}

impl<S> Clone for TagIndex<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: KeyValueStore> TagIndex<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Record `id` under each of `tags`. No-op for an empty tag set.
    ///
    /// Stops at the first failing command; earlier adds remain applied.
    pub async fn index(&self, id: ArticleId, tags: &BTreeSet<String>) -> StoreResult<()> {
        if tags.is_empty() {
            return Ok(());
        }

        let member = [id.to_string()];
        for tag in tags {
            self.store.set_add(&keys::tag_members(tag), &member).await?;
        }

        let tags: Vec<String> = tags.iter().cloned().collect();
        self.store.set_add(keys::TAG_CATALOG, &tags).await?;
        self.store.set_add(&keys::article_tags(id), &tags).await?;

        debug!(article_id = %id, tags = tags.len(), "tag index updated");
        Ok(())
    }

    /// Article ids carrying `tag`. Empty for unknown tags.
    pub async fn members_of(&self, tag: &str) -> StoreResult<BTreeSet<ArticleId>> {
        let key = keys::tag_members(tag);
        self.store
            .set_members(&key)
            .await?
            .iter()
            .map(|raw| keys::parse_article_id(&key, raw))
            .collect()
    }

    /// Every tag ever indexed.
    pub async fn catalog(&self) -> StoreResult<BTreeSet<String>> {
        self.store.set_members(keys::TAG_CATALOG).await
    }
}
