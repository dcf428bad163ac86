use crate::error::{Result, StoreError};
use crate::repository::Repository;
use async_trait::async_trait;
use shortcard_core::{DurableId, LinkRecord};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// File-backed repository: one JSON array of records at a fixed path.
///
/// The storage medium has no append or update primitive, so every insert
/// reads the whole collection, appends in memory, and rewrites the file.
/// A single-writer mutex serializes that cycle; without it two concurrent
/// inserts would both write the pre-insert snapshot and the last writer
/// would silently drop the other's record.
///
/// An absent, unreadable, or corrupt file always reads as the empty
/// collection. The containing directory is created lazily on first write.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection, treating any failure as "zero records".
    async fn read_all(&self) -> Vec<LinkRecord> {
        let Ok(bytes) = tokio::fs::read(&self.path).await else {
            return Vec::new();
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    async fn write_all(&self, records: &[LinkRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for JsonFileRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_all().await;
        records.push(record);
        self.write_all(&records).await
    }

    async fn get(&self, id: &DurableId) -> Result<Option<LinkRecord>> {
        let records = self.read_all().await;
        Ok(records.into_iter().find(|r| r.id == id.as_str()))
    }
}
