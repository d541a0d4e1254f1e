//! Redis-backed [`KeyValueStore`] implementation.
//!
//! Each trait call issues exactly one Redis command over a shared
//! [`ConnectionManager`], which multiplexes commands from concurrent callers
//! and reconnects transparently. Nothing here wraps commands in `MULTI`.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, RedisError};
use tracing::info;

use article_index_core::store::{KeyValueStore, StoreError, StoreResult};

use crate::config::StoreConfig;

/// Redis implementation of the [`KeyValueStore`] trait.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

/// Open a managed connection to the configured Redis server.
pub async fn connect(config: &StoreConfig) -> Result<RedisStore> {
    let client = Client::open(config.url.as_str())
        .with_context(|| format!("Invalid store.url '{}'", config.url))?;

    let manager_config = ConnectionManagerConfig::new().set_number_of_retries(config.retries);
    let conn = client
        .get_connection_manager_with_config(manager_config)
        .await
        .with_context(|| format!("Failed to connect to Redis at {}", config.url))?;

    info!(url = %config.url, "connected to redis");
    Ok(RedisStore::new(conn))
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreError::Unavailable(err.to_string())
    } else {
        StoreError::Backend(err.to_string())
    }
}

fn score_to_count(key: &str, score: f64) -> StoreResult<u64> {
    if score.is_finite() && score >= 0.0 && score.fract() == 0.0 {
        Ok(score as u64)
    } else {
        Err(StoreError::invalid_data(
            key,
            format!("score {score} is not a read count"),
        ))
    }
}

/// Last index of a head window of `len` entries, as Redis expects it.
fn stop_index(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX) - 1
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_error)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.set(key, value).await.map_err(store_error)
    }

    async fn incr(&self, key: &str) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        conn.incr(key, 1u64).await.map_err(store_error)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.del(key).await.map_err(store_error)
    }

    async fn set_add(&self, key: &str, members: &[String]) -> StoreResult<()> {
        // SADD with no members is a syntax error
        if members.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.clone();
        conn.sadd(key, members).await.map_err(store_error)
    }

    async fn set_members(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        let mut conn = self.conn.clone();
        let members: Vec<String> = conn.smembers(key).await.map_err(store_error)?;
        Ok(members.into_iter().collect())
    }

    async fn list_push(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.lpush(key, value).await.map_err(store_error)
    }

    async fn list_trim(&self, key: &str, len: usize) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        if len == 0 {
            // LTRIM 0 -1 would keep everything
            return conn.del(key).await.map_err(store_error);
        }
        conn.ltrim(key, 0, stop_index(len))
            .await
            .map_err(store_error)
    }

    async fn list_range(&self, key: &str, limit: usize) -> StoreResult<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();
        conn.lrange(key, 0, stop_index(limit))
            .await
            .map_err(store_error)
    }

    async fn zset_incr(&self, key: &str, member: &str, delta: u64) -> StoreResult<u64> {
        let mut conn = self.conn.clone();
        let score: f64 = conn.zincr(key, member, delta).await.map_err(store_error)?;
        score_to_count(key, score)
    }

    async fn zset_rev_range(&self, key: &str, limit: usize) -> StoreResult<Vec<(String, u64)>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn.clone();
        let ranked: Vec<(String, f64)> = conn
            .zrevrange_withscores(key, 0, stop_index(limit))
            .await
            .map_err(store_error)?;
        ranked
            .into_iter()
            .map(|(member, score)| Ok((member, score_to_count(key, score)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_index() {
        assert_eq!(stop_index(1), 0);
        assert_eq!(stop_index(5), 4);
    }

    #[test]
    fn test_score_to_count() {
        assert_eq!(score_to_count("k", 3.0).unwrap(), 3);
        assert!(score_to_count("k", -1.0).is_err());
        assert!(score_to_count("k", 1.5).is_err());
        assert!(score_to_count("k", f64::NAN).is_err());
    }

    #[test]
    fn test_refused_connection_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = store_error(RedisError::from(io));
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn test_protocol_error_is_backend() {
        let err = store_error(RedisError::from((
            redis::ErrorKind::TypeError,
            "WRONGTYPE",
        )));
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
