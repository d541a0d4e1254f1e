use anyhow::Result;
use article_index_core::service::ArticleService;
use std::sync::Arc;

use crate::config::Config;
use crate::redis_store::{self, RedisStore};

/// Connect to the configured store and build the article service over it.
pub async fn connect(config: &Config) -> Result<ArticleService<RedisStore>> {
    let store = redis_store::connect(&config.store).await?;

    Ok(ArticleService::new(
        Arc::new(store),
        config.indexes.settings(),
    ))
}
