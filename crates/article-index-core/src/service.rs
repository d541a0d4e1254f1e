//! Article service facade.
//!
//! Composes the five index components into the operations the presentation
//! layer calls. Writes go to each index independently; reads fan out.
//!
//! # Consistency
//!
//! No operation is transactional across indices. The primary write of each
//! operation (the article body on publish, the article fetch on read) decides
//! the outcome; secondary index writes are best-effort. Their failures are
//! logged at `warn` and never reach the caller, so a reader can observe an
//! article that is stored but missing from the tag index or latest list.
//! [`ArticleService::reconcile`] repairs those two indices on demand.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::articles::ArticleStore;
use crate::error::{ArticleError, ArticleResult};
use crate::models::{Article, ArticleId, HomeView, ReadCount, ReconcileReport};
use crate::popularity::PopularityIndex;
use crate::recency::{RecencyIndex, UserHistoryIndex};
use crate::store::{KeyValueStore, StoreResult};
use crate::tag_index::TagIndex;
use crate::tags::normalize_tags;
use crate::{DEFAULT_CAPACITY, DEFAULT_TOP_K};

/// Bounds applied to the derived views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSettings {
    /// `N`: length bound of the latest list and of each user history.
    pub capacity: usize,
    /// `K`: entries in the home view's most-read ranking.
    pub top_k: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Entry point for publishing, reading, and querying articles.
pub struct ArticleService<S> {
    articles: ArticleStore<S>,
    tags: TagIndex<S>,
    recency: RecencyIndex<S>,
    history: UserHistoryIndex<S>,
    popularity: PopularityIndex<S>,
    settings: IndexSettings,
}

impl<S> Clone for ArticleService<S> {
    fn clone(&self) -> Self {
        Self {
            articles: self.articles.clone(),
            tags: self.tags.clone(),
            recency: self.recency.clone(),
            history: self.history.clone(),
            popularity: self.popularity.clone(),
            settings: self.settings,
        }
    }
}

impl<S: KeyValueStore> ArticleService<S> {
    pub fn new(store: Arc<S>, settings: IndexSettings) -> Self {
        let settings = IndexSettings {
            capacity: settings.capacity.max(1),
            top_k: settings.top_k.max(1),
        };
        Self {
            articles: ArticleStore::new(Arc::clone(&store)),
            tags: TagIndex::new(Arc::clone(&store)),
            recency: RecencyIndex::new(Arc::clone(&store), settings.capacity),
            history: UserHistoryIndex::new(Arc::clone(&store), settings.capacity),
            popularity: PopularityIndex::new(store),
            settings,
        }
    }

    pub fn settings(&self) -> IndexSettings {
        self.settings
    }

    /// Publish an article with a free-form tag field (`"go, rust"`).
    ///
    /// Returns the new id once the article itself is stored, whether or not
    /// the tag index and latest list updates succeeded.
    pub async fn publish(&self, body: &str, raw_tags: &str) -> StoreResult<ArticleId> {
        let tags = normalize_tags(raw_tags);
        let id = self.articles.create(body, &tags).await?;

        if let Err(e) = self.tags.index(id, &tags).await {
            warn!(article_id = %id, error = %e, "tag index update failed; continuing");
        }
        if let Err(e) = self.recency.push(id).await {
            warn!(article_id = %id, error = %e, "latest list update failed; continuing");
        }

        info!(article_id = %id, tags = tags.len(), "article published");
        Ok(id)
    }

    /// Fetch an article and record that `user_id` read it.
    ///
    /// The read is recorded (history push and read count) only when the
    /// fetch succeeds. Recording is best-effort.
    pub async fn record_read_and_fetch(&self, id: ArticleId, user_id: &str) -> ArticleResult<Article> {
        let article = self.articles.get(id).await?;

        let (pushed, counted) = futures::join!(
            self.history.push(user_id, id),
            self.popularity.increment(id)
        );
        if let Err(e) = pushed {
            warn!(article_id = %id, user = user_id, error = %e, "read history update failed; continuing");
        }
        if let Err(e) = counted {
            warn!(article_id = %id, error = %e, "read count update failed; continuing");
        }

        Ok(article)
    }

    /// Fetch an article without recording a read.
    pub async fn get_article(&self, id: ArticleId) -> ArticleResult<Article> {
        self.articles.get(id).await
    }

    /// Ids tagged with `tag`, ascending.
    pub async fn articles_by_tag(&self, tag: &str) -> StoreResult<Vec<ArticleId>> {
        Ok(self.tags.members_of(tag).await?.into_iter().collect())
    }

    /// Latest published ids, newest first. `limit` is clamped to `N`.
    pub async fn latest(&self, limit: usize) -> StoreResult<Vec<ArticleId>> {
        self.recency.latest(limit).await
    }

    /// Every tag ever used.
    pub async fn tags(&self) -> StoreResult<BTreeSet<String>> {
        self.tags.catalog().await
    }

    /// The `k` most-read articles.
    pub async fn top_read(&self, k: usize) -> StoreResult<Vec<ReadCount>> {
        self.popularity.top_k(k).await
    }

    /// What `user_id` read most recently, newest first. `limit` is clamped to `N`.
    pub async fn history(&self, user_id: &str, limit: usize) -> StoreResult<Vec<ArticleId>> {
        self.history.history(user_id, limit).await
    }

    /// Landing-page view: four independent queries issued concurrently.
    ///
    /// Any failing query fails the whole view; partial data is never
    /// returned as if complete.
    pub async fn home_view(&self, user_id: &str) -> StoreResult<HomeView> {
        let n = self.settings.capacity;
        let (latest, tags, top_read, history) = futures::try_join!(
            self.recency.latest(n),
            self.tags.catalog(),
            self.popularity.top_k(self.settings.top_k),
            self.history.history(user_id, n),
        )?;
        Ok(HomeView {
            latest,
            tags,
            top_read,
            history,
        })
    }

    /// Rebuild the tag index and latest list from stored articles.
    ///
    /// Scans every allocated id, re-applies tag indexing for each stored
    /// article, then replaces the latest list with the newest `N` stored ids.
    /// Read history and read counts are not derived from articles and are
    /// left untouched. Storage errors abort the pass.
    pub async fn reconcile(&self) -> StoreResult<ReconcileReport> {
        let last = self.articles.last_allocated().await?;
        let mut report = ReconcileReport {
            scanned: last,
            ..ReconcileReport::default()
        };
        let mut newest: Vec<ArticleId> = Vec::with_capacity(self.settings.capacity);

        for raw in (1..=last).rev() {
            let id = ArticleId(raw);
            let article = match self.articles.get(id).await {
                Ok(article) => article,
                Err(ArticleError::NotFound(_)) => {
                    report.missing += 1;
                    continue;
                }
                Err(ArticleError::Storage(e)) => return Err(e),
            };
            self.tags.index(id, &article.tags).await?;
            report.indexed += 1;
            if newest.len() < self.settings.capacity {
                newest.push(id);
            }
        }

        self.recency.rebuild(&newest).await?;
        report.latest = newest;

        info!(
            scanned = report.scanned,
            indexed = report.indexed,
            missing = report.missing,
            "reconcile finished"
        );
        Ok(report)
    }
}
