use async_trait::async_trait;
use crate::types::MarsRecord;
use crate::Result;

#[async_trait]
pub trait RecordStorage: Send + Sync {
    /// The current record, if a scrape was ever persisted
    async fn find_singleton(&self) -> Result<Option<MarsRecord>>;

    /// Replace the current record
    async fn upsert_singleton(&self, record: &MarsRecord) -> Result<()>;
}

/// Anything that can produce a fresh record on demand.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn scrape(&self) -> Result<MarsRecord>;
}
