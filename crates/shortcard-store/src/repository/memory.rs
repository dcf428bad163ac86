use crate::error::Result;
use crate::repository::Repository;
use async_trait::async_trait;
use dashmap::DashMap;
use shortcard_core::{DurableId, LinkRecord};

/// In-memory implementation of the Repository trait using DashMap.
///
/// Useful for tests and for ephemeral deployments that rely on the
/// self-contained token fallback for anything that must outlive the
/// process. DashMap's sharded locks let concurrent reads and writes to
/// different buckets proceed without blocking.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, LinkRecord>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, record: LinkRecord) -> Result<()> {
        self.storage.insert(record.id.clone(), record);
        Ok(())
    }

    async fn get(&self, id: &DurableId) -> Result<Option<LinkRecord>> {
        Ok(self
            .storage
            .get(id.as_str())
            .map(|entry| entry.value().clone()))
    }
}
