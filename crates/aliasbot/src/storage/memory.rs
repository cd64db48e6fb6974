//! In-memory alias store.

use async_trait::async_trait;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::AliasStore;
use crate::error::CoreResult;
use crate::types::MessageAlias;

/// Plain alias map shared by the in-memory and file-backed stores.
#[derive(Debug, Default, Clone)]
pub(crate) struct AliasTable {
    entries: HashMap<String, MessageAlias>,
}

impl AliasTable {
    pub(crate) fn from_entries(entries: Vec<MessageAlias>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|alias| (alias.key.clone(), alias))
                .collect(),
        }
    }

    pub(crate) fn insert(&mut self, alias: MessageAlias) {
        self.entries.insert(alias.key.clone(), alias);
    }

    /// Returns `false` and leaves the table untouched when the key is taken.
    pub(crate) fn insert_if_absent(&mut self, alias: MessageAlias) -> bool {
        match self.entries.entry(alias.key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(alias);
                true
            }
        }
    }

    pub(crate) fn get(&self, key: &str) -> Option<MessageAlias> {
        self.entries.get(key).cloned()
    }

    pub(crate) fn increment_usage(&mut self, key: &str) -> Option<MessageAlias> {
        let alias = self.entries.get_mut(key)?;
        let before = alias.clone();
        alias.usage_count = alias.usage_count.saturating_add(1);
        Some(before)
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn page(&self, offset: usize, limit: usize) -> Vec<MessageAlias> {
        // stable sort keeps key order among equal timestamps
        let mut aliases = self.sorted_entries();
        aliases.sort_by_key(|alias| alias.created_at);
        aliases.into_iter().skip(offset).take(limit).collect()
    }

    pub(crate) fn top_by_usage(&self, n: usize) -> Vec<MessageAlias> {
        let mut aliases = self.sorted_entries();
        aliases.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        aliases.truncate(n);
        aliases
    }

    /// Snapshot ordered by key, used for persistence.
    pub(crate) fn sorted_entries(&self) -> Vec<MessageAlias> {
        let mut aliases: Vec<MessageAlias> = self.entries.values().cloned().collect();
        aliases.sort_by(|a, b| a.key.cmp(&b.key));
        aliases
    }
}

#[derive(Debug, Default)]
pub struct MemoryAliasStore {
    table: RwLock<AliasTable>,
}

impl MemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AliasStore for MemoryAliasStore {
    async fn save(&self, alias: MessageAlias) -> CoreResult<()> {
        self.table.write().await.insert(alias);
        Ok(())
    }

    async fn insert_if_absent(&self, alias: MessageAlias) -> CoreResult<bool> {
        Ok(self.table.write().await.insert_if_absent(alias))
    }

    async fn get(&self, key: &str) -> CoreResult<Option<MessageAlias>> {
        Ok(self.table.read().await.get(key))
    }

    async fn get_and_increment_usage(&self, key: &str) -> CoreResult<Option<MessageAlias>> {
        Ok(self.table.write().await.increment_usage(key))
    }

    async fn delete(&self, key: &str) -> CoreResult<bool> {
        Ok(self.table.write().await.remove(key))
    }

    async fn list(&self, offset: usize, limit: usize) -> CoreResult<Vec<MessageAlias>> {
        Ok(self.table.read().await.page(offset, limit))
    }

    async fn len(&self) -> CoreResult<usize> {
        Ok(self.table.read().await.len())
    }

    async fn top_by_usage(&self, n: usize) -> CoreResult<Vec<MessageAlias>> {
        Ok(self.table.read().await.top_by_usage(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn alias_at(key: &str, minutes_ago: i64) -> MessageAlias {
        MessageAlias {
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            ..MessageAlias::new(key, format!("{key} message"), 1)
        }
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = MemoryAliasStore::new();
        assert!(store.get("nonexistent").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn save_and_get() {
        let store = MemoryAliasStore::new();
        store
            .save(MessageAlias::new("hello", "world", 7))
            .await
            .expect("save");
        let alias = store.get("hello").await.expect("get").expect("alias");
        assert_eq!(alias.message, "world");
        assert_eq!(alias.creator_id, 7);
        assert_eq!(store.len().await.expect("len"), 1);
    }

    #[tokio::test]
    async fn save_replaces_same_key() {
        let store = MemoryAliasStore::new();
        store.save(MessageAlias::new("k", "old", 1)).await.expect("save");
        store.save(MessageAlias::new("k", "new", 2)).await.expect("save");
        assert_eq!(store.len().await.expect("len"), 1);
        let alias = store.get("k").await.expect("get").expect("alias");
        assert_eq!(alias.message, "new");
    }

    #[tokio::test]
    async fn insert_if_absent_keeps_first_alias() {
        let store = MemoryAliasStore::new();
        assert!(store
            .insert_if_absent(MessageAlias::new("k", "first", 1))
            .await
            .expect("insert"));
        assert!(!store
            .insert_if_absent(MessageAlias::new("k", "second", 2))
            .await
            .expect("insert"));
        let alias = store.get("k").await.expect("get").expect("alias");
        assert_eq!(alias.message, "first");
        assert_eq!(alias.creator_id, 1);
    }

    #[tokio::test]
    async fn delete_existing_key() {
        let store = MemoryAliasStore::new();
        store.save(MessageAlias::new("k", "v", 1)).await.expect("save");
        assert!(store.delete("k").await.expect("delete"));
        assert!(!store.delete("k").await.expect("delete"));
        assert!(store.get("k").await.expect("get").is_none());
    }

    #[tokio::test]
    async fn list_pages_oldest_first() {
        let store = MemoryAliasStore::new();
        store.save(alias_at("c", 1)).await.expect("save");
        store.save(alias_at("a", 3)).await.expect("save");
        store.save(alias_at("b", 2)).await.expect("save");

        let keys = |aliases: Vec<MessageAlias>| -> Vec<String> {
            aliases.into_iter().map(|alias| alias.key).collect()
        };
        assert_eq!(keys(store.list(0, 2).await.expect("list")), vec!["a", "b"]);
        assert_eq!(keys(store.list(2, 2).await.expect("list")), vec!["c"]);
        assert!(store.list(5, 2).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn usage_ranking() {
        let store = MemoryAliasStore::new();
        for key in ["x", "y", "z"] {
            store.save(MessageAlias::new(key, "m", 1)).await.expect("save");
        }
        for _ in 0..3 {
            store.get_and_increment_usage("y").await.expect("use");
        }
        let before = store
            .get_and_increment_usage("z")
            .await
            .expect("use")
            .expect("alias");
        assert_eq!(before.usage_count, 0);

        let top = store.top_by_usage(2).await.expect("top");
        let ranked: Vec<(&str, u32)> = top
            .iter()
            .map(|alias| (alias.key.as_str(), alias.usage_count))
            .collect();
        assert_eq!(ranked, vec![("y", 3), ("z", 1)]);
    }

    #[tokio::test]
    async fn increment_missing_key_is_none() {
        let store = MemoryAliasStore::new();
        assert!(store
            .get_and_increment_usage("ghost")
            .await
            .expect("use")
            .is_none());
    }
}
