pub mod file;
pub mod memory;

use crate::error::Result;
use async_trait::async_trait;
use shortcard_core::{DurableId, LinkRecord};

/// Durable id → record mapping.
///
/// Implementations store complete records keyed by their durable ID.
/// There is no delete or update: records are immutable and live forever.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Persists a new record.
    ///
    /// IDs are random with an unchecked 62^8 keyspace, so implementations
    /// do not guard against collisions.
    async fn insert(&self, record: LinkRecord) -> Result<()>;

    /// Retrieves the record for a durable ID.
    /// Returns `None` if the ID does not exist.
    async fn get(&self, id: &DurableId) -> Result<Option<LinkRecord>>;
}
