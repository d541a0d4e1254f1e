//! Storage abstraction for the article indices.
//!
//! The [`KeyValueStore`] trait exposes the handful of remote data-structure
//! commands the indices are built from: scalars, sets, head-bounded lists
//! and a score-ranked sorted set. Each call maps to exactly one atomic store
//! command; no multi-command transactions exist, so sequences of calls can
//! interleave with other clients.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

/// Failures surfaced by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached (refused, dropped, timed out).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a protocol-level error.
    #[error("store error: {0}")]
    Backend(String),

    /// A stored value could not be interpreted.
    #[error("invalid data at `{key}`: {detail}")]
    InvalidData { key: String, detail: String },
}

impl StoreError {
    pub fn invalid_data(key: impl Into<String>, detail: impl Into<String>) -> Self {
        StoreError::InvalidData {
            key: key.into(),
            detail: detail.into(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Abstract key-value / data-structure store.
///
/// # Operations
///
/// | Method | Redis equivalent |
/// |--------|------------------|
/// | [`get`](KeyValueStore::get) | `GET` |
/// | [`set`](KeyValueStore::set) | `SET` |
/// | [`incr`](KeyValueStore::incr) | `INCR` |
/// | [`delete`](KeyValueStore::delete) | `DEL` |
/// | [`set_add`](KeyValueStore::set_add) | `SADD` |
/// | [`set_members`](KeyValueStore::set_members) | `SMEMBERS` |
/// | [`list_push`](KeyValueStore::list_push) | `LPUSH` |
/// | [`list_trim`](KeyValueStore::list_trim) | `LTRIM key 0 len-1` |
/// | [`list_range`](KeyValueStore::list_range) | `LRANGE key 0 limit-1` |
/// | [`zset_incr`](KeyValueStore::zset_incr) | `ZINCRBY` |
/// | [`zset_rev_range`](KeyValueStore::zset_rev_range) | `ZREVRANGE .. WITHSCORES` |
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a scalar. `None` when the key is absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrite a scalar.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Atomically increment an integer scalar by one, returning the new value.
    /// An absent key counts as zero.
    async fn incr(&self, key: &str) -> StoreResult<u64>;

    /// Remove a key of any type. Absent keys are ignored.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Add members to a set, creating it if needed. Empty input is a no-op.
    async fn set_add(&self, key: &str, members: &[String]) -> StoreResult<()>;

    /// All members of a set; empty when the key is absent.
    async fn set_members(&self, key: &str) -> StoreResult<BTreeSet<String>>;

    /// Prepend a value to a list, creating it if needed.
    async fn list_push(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Keep only the first `len` entries of a list. `len == 0` empties it.
    async fn list_trim(&self, key: &str, len: usize) -> StoreResult<()>;

    /// The first `limit` entries of a list, head first.
    async fn list_range(&self, key: &str, limit: usize) -> StoreResult<Vec<String>>;

    /// Add `delta` to a member's score, creating it at `delta` if absent.
    /// Returns the new score.
    async fn zset_incr(&self, key: &str, member: &str, delta: u64) -> StoreResult<u64>;

    /// The `limit` highest-scored members, descending by score. Equal scores
    /// come back in descending lexicographic member order.
    async fn zset_rev_range(&self, key: &str, limit: usize) -> StoreResult<Vec<(String, u64)>>;
}
