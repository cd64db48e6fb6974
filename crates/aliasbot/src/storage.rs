//! Alias persistence.

pub mod file;
pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::types::MessageAlias;

pub use file::FileAliasStore;
pub use memory::MemoryAliasStore;

#[async_trait]
pub trait AliasStore: Send + Sync {
    /// Inserts `alias`, replacing any entry with the same key.
    async fn save(&self, alias: MessageAlias) -> CoreResult<()>;
    /// Inserts `alias` only if its key is free, in one step. Returns `false`
    /// when another alias already holds the key.
    async fn insert_if_absent(&self, alias: MessageAlias) -> CoreResult<bool>;
    async fn get(&self, key: &str) -> CoreResult<Option<MessageAlias>>;
    /// Looks up `key` and bumps its usage count. Returns the alias as it was
    /// before the bump.
    async fn get_and_increment_usage(&self, key: &str) -> CoreResult<Option<MessageAlias>>;
    /// Returns `true` if an alias was removed.
    async fn delete(&self, key: &str) -> CoreResult<bool>;
    /// Oldest first, ties broken by key.
    async fn list(&self, offset: usize, limit: usize) -> CoreResult<Vec<MessageAlias>>;
    async fn len(&self) -> CoreResult<usize>;
    /// Most used first, ties broken by key.
    async fn top_by_usage(&self, n: usize) -> CoreResult<Vec<MessageAlias>>;
}

pub type SharedAliasStore = Arc<dyn AliasStore>;
