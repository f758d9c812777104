use async_trait::async_trait;
use mars_core::{MarsRecord, RecordStorage, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::StorageBackend;

/// Keeps the record for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    record: Arc<RwLock<Option<MarsRecord>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn connect(_url: Option<&str>) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl RecordStorage for InMemoryStorage {
    async fn find_singleton(&self) -> Result<Option<MarsRecord>> {
        Ok(self.record.read().await.clone())
    }

    async fn upsert_singleton(&self, record: &MarsRecord) -> Result<()> {
        *self.record.write().await = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mars_core::HemisphereEntry;

    fn record(title: &str) -> MarsRecord {
        MarsRecord {
            news_title: Some(title.to_string()),
            news_paragraph: Some("Teaser".to_string()),
            featured_image: None,
            facts: Some("<table></table>".to_string()),
            hemispheres: vec![HemisphereEntry {
                image_url: "https://astropedia.example/cerberus.jpg".to_string(),
                title: "Cerberus Hemisphere Enhanced".to_string(),
            }],
            weather: None,
            last_modified: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_empty_until_first_upsert() {
        let storage = InMemoryStorage::new();
        assert!(storage.find_singleton().await.unwrap().is_none());

        storage.upsert_singleton(&record("first")).await.unwrap();
        let stored = storage.find_singleton().await.unwrap().unwrap();
        assert_eq!(stored.news_title.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let storage = InMemoryStorage::new();
        storage.upsert_singleton(&record("first")).await.unwrap();
        let second = record("second");
        storage.upsert_singleton(&second).await.unwrap();

        assert_eq!(storage.find_singleton().await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn test_clones_share_the_record() {
        let storage = InMemoryStorage::new();
        let other = storage.clone();
        storage.upsert_singleton(&record("shared")).await.unwrap();
        assert!(other.find_singleton().await.unwrap().is_some());
    }
}
