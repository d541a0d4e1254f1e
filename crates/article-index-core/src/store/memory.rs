//! In-memory [`KeyValueStore`] implementation for tests and embedding.
//!
//! Uses a `HashMap` of typed values behind `std::sync::RwLock`. Command
//! semantics follow Redis closely enough for the indices to behave the same
//! way against either backend: type mismatches fail with `WRONGTYPE`, lists
//! grow at the head, and reverse ranges break score ties by descending member.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{KeyValueStore, StoreError, StoreResult};

enum Value {
    Scalar(String),
    Set(BTreeSet<String>),
    List(VecDeque<String>),
    Sorted(HashMap<String, u64>),
}

impl Value {
    fn kind(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "string",
            Value::Set(_) => "set",
            Value::List(_) => "list",
            Value::Sorted(_) => "zset",
        }
    }
}

fn wrong_type(key: &str, found: &Value) -> StoreError {
    StoreError::Backend(format!(
        "WRONGTYPE operation against key `{key}` holding a {}",
        found.kind()
    ))
}

/// In-memory store for testing.
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, HashMap<String, Value>>> {
        self.entries
            .read()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, HashMap<String, Value>>> {
        self.entries
            .write()
            .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(None),
            Some(Value::Scalar(s)) => Ok(Some(s.clone())),
            Some(other) => Err(wrong_type(key, other)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.write()?;
        entries.insert(key.to_string(), Value::Scalar(value.to_string()));
        Ok(())
    }

    async fn incr(&self, key: &str) -> StoreResult<u64> {
        let mut entries = self.write()?;
        let current = match entries.get(key) {
            None => 0,
            Some(Value::Scalar(s)) => s.parse::<u64>().map_err(|_| {
                StoreError::Backend(format!("value at `{key}` is not an integer"))
            })?,
            Some(other) => return Err(wrong_type(key, other)),
        };
        let next = current + 1;
        entries.insert(key.to_string(), Value::Scalar(next.to_string()));
        Ok(next)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.write()?.remove(key);
        Ok(())
    }

    async fn set_add(&self, key: &str, members: &[String]) -> StoreResult<()> {
        if members.is_empty() {
            return Ok(());
        }
        let mut entries = self.write()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Set(BTreeSet::new()));
        match entry {
            Value::Set(set) => {
                set.extend(members.iter().cloned());
                Ok(())
            }
            other => Err(wrong_type(key, other)),
        }
    }

    async fn set_members(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(BTreeSet::new()),
            Some(Value::Set(set)) => Ok(set.clone()),
            Some(other) => Err(wrong_type(key, other)),
        }
    }

    async fn list_push(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.write()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Value::List(VecDeque::new()));
        match entry {
            Value::List(list) => {
                list.push_front(value.to_string());
                Ok(())
            }
            other => Err(wrong_type(key, other)),
        }
    }

    async fn list_trim(&self, key: &str, len: usize) -> StoreResult<()> {
        let mut entries = self.write()?;
        let now_empty = match entries.get_mut(key) {
            None => return Ok(()),
            Some(Value::List(list)) => {
                list.truncate(len);
                list.is_empty()
            }
            Some(other) => return Err(wrong_type(key, other)),
        };
        // Redis drops a list once its last element is removed.
        if now_empty {
            entries.remove(key);
        }
        Ok(())
    }

    async fn list_range(&self, key: &str, limit: usize) -> StoreResult<Vec<String>> {
        let entries = self.read()?;
        match entries.get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(list)) => Ok(list.iter().take(limit).cloned().collect()),
            Some(other) => Err(wrong_type(key, other)),
        }
    }

    async fn zset_incr(&self, key: &str, member: &str, delta: u64) -> StoreResult<u64> {
        let mut entries = self.write()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Sorted(HashMap::new()));
        match entry {
            Value::Sorted(scores) => {
                let score = scores.entry(member.to_string()).or_insert(0);
                *score += delta;
                Ok(*score)
            }
            other => Err(wrong_type(key, other)),
        }
    }

    async fn zset_rev_range(&self, key: &str, limit: usize) -> StoreResult<Vec<(String, u64)>> {
        let entries = self.read()?;
        let scores = match entries.get(key) {
            None => return Ok(Vec::new()),
            Some(Value::Sorted(scores)) => scores,
            Some(other) => return Err(wrong_type(key, other)),
        };
        let mut ranked: Vec<(String, u64)> =
            scores.iter().map(|(m, s)| (m.clone(), *s)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        ranked.truncate(limit);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_scalar_get_set() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_incr_starts_at_one() {
        let store = InMemoryStore::new();
        assert_eq!(store.incr("n").await.unwrap(), 1);
        assert_eq!(store.incr("n").await.unwrap(), 2);
        store.set("bad", "x").await.unwrap();
        assert!(matches!(
            store.incr("bad").await,
            Err(StoreError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn test_wrong_type_is_backend_error() {
        let store = InMemoryStore::new();
        store.set_add("s", &strings(&["a"])).await.unwrap();
        let err = store.get("s").await.unwrap_err();
        assert!(err.to_string().contains("WRONGTYPE"));
        assert!(store.list_push("s", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_set_add_creates_nothing() {
        let store = InMemoryStore::new();
        store.set_add("s", &[]).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_push_trim_range() {
        let store = InMemoryStore::new();
        for v in ["1", "2", "3", "4"] {
            store.list_push("l", v).await.unwrap();
        }
        assert_eq!(store.list_range("l", 10).await.unwrap(), strings(&["4", "3", "2", "1"]));
        store.list_trim("l", 2).await.unwrap();
        assert_eq!(store.list_range("l", 10).await.unwrap(), strings(&["4", "3"]));
        assert_eq!(store.list_range("l", 1).await.unwrap(), strings(&["4"]));
        store.list_trim("l", 0).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_zset_rev_range_orders_by_score_then_member_desc() {
        let store = InMemoryStore::new();
        store.zset_incr("z", "a", 1).await.unwrap();
        store.zset_incr("z", "b", 1).await.unwrap();
        assert_eq!(store.zset_incr("z", "c", 2).await.unwrap(), 2);
        let ranked = store.zset_rev_range("z", 10).await.unwrap();
        assert_eq!(
            ranked,
            vec![
                ("c".to_string(), 2),
                ("b".to_string(), 1),
                ("a".to_string(), 1)
            ]
        );
        assert_eq!(store.zset_rev_range("z", 1).await.unwrap().len(), 1);
    }
}
