use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::memory::AliasTable;
use super::AliasStore;
use crate::error::{CoreError, CoreResult};
use crate::types::MessageAlias;

/// Alias store persisted as a single JSON document.
///
/// The whole table is kept in memory and the file is rewritten after every
/// mutation, so the lock is held across the write. A failed write leaves
/// both the file and the in-memory table as they were.
pub struct FileAliasStore {
    path: PathBuf,
    table: Mutex<AliasTable>,
}

impl FileAliasStore {
    /// Loads `path` if it exists; a missing file is an empty store.
    pub async fn open(path: PathBuf) -> CoreResult<Self> {
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<MessageAlias>>(&bytes).map_err(|error| {
                CoreError::Storage(format!(
                    "failed to decode alias file {}: {error}",
                    path.display()
                ))
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                return Err(CoreError::Storage(format!(
                    "failed to read alias file {}: {error}",
                    path.display()
                )))
            }
        };

        tracing::debug!("loaded {} aliases from {}", entries.len(), path.display());

        Ok(Self {
            path,
            table: Mutex::new(AliasTable::from_entries(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                CoreError::Storage(format!(
                    "failed to create storage directory {}: {error}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }

    /// Writes `table` to a sibling temp file and renames it over the alias
    /// file, so a crash mid-write never leaves a truncated document.
    async fn persist(&self, table: &AliasTable) -> CoreResult<()> {
        Self::ensure_parent_dir(&self.path).await?;
        let serialized = serde_json::to_vec_pretty(&table.sorted_entries())
            .map_err(|error| CoreError::Storage(format!("alias serialize error: {error}")))?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, serialized)
            .await
            .map_err(|error| {
                CoreError::Storage(format!(
                    "failed to write alias file {}: {error}",
                    staging.display()
                ))
            })?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .map_err(|error| {
                CoreError::Storage(format!(
                    "failed to replace alias file {}: {error}",
                    self.path.display()
                ))
            })
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Applies `change` to a copy of the table and commits it only once the
    /// copy is on disk. `change` reports whether anything changed; unchanged
    /// tables are not written.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut AliasTable) -> (T, bool) + Send,
    ) -> CoreResult<T> {
        let mut table = self.table.lock().await;
        let mut next = table.clone();
        let (result, changed) = change(&mut next);
        if changed {
            self.persist(&next).await?;
            *table = next;
        }
        Ok(result)
    }
}

#[async_trait]
impl AliasStore for FileAliasStore {
    async fn save(&self, alias: MessageAlias) -> CoreResult<()> {
        self.mutate(|table| {
            table.insert(alias);
            ((), true)
        })
        .await
    }

    async fn insert_if_absent(&self, alias: MessageAlias) -> CoreResult<bool> {
        self.mutate(|table| {
            let inserted = table.insert_if_absent(alias);
            (inserted, inserted)
        })
        .await
    }

    async fn get(&self, key: &str) -> CoreResult<Option<MessageAlias>> {
        Ok(self.table.lock().await.get(key))
    }

    async fn get_and_increment_usage(&self, key: &str) -> CoreResult<Option<MessageAlias>> {
        self.mutate(|table| {
            let found = table.increment_usage(key);
            let changed = found.is_some();
            (found, changed)
        })
        .await
    }

    async fn delete(&self, key: &str) -> CoreResult<bool> {
        self.mutate(|table| {
            let removed = table.remove(key);
            (removed, removed)
        })
        .await
    }

    async fn list(&self, offset: usize, limit: usize) -> CoreResult<Vec<MessageAlias>> {
        Ok(self.table.lock().await.page(offset, limit))
    }

    async fn len(&self) -> CoreResult<usize> {
        Ok(self.table.lock().await.len())
    }

    async fn top_by_usage(&self, n: usize) -> CoreResult<Vec<MessageAlias>> {
        Ok(self.table.lock().await.top_by_usage(n))
    }
}
