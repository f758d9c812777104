use async_trait::async_trait;
use mars_core::{Error, RecordStorage, Result};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: RecordStorage + Sized {
    fn get_error_message() -> &'static str;

    /// Opens the backend. `url` is backend specific; `None` picks the default.
    async fn connect(url: Option<&str>) -> Result<Self>;
}

/// Storage kinds accepted by [`create_storage`].
pub const STORAGE_KINDS: &[&str] = &[
    "memory",
    #[cfg(feature = "sqlite")]
    "sqlite",
];

async fn open<T: StorageBackend + 'static>(url: Option<&str>) -> Result<Arc<dyn RecordStorage>> {
    let storage = T::connect(url)
        .await
        .map_err(|e| Error::Storage(format!("{} ({})", T::get_error_message(), e)))?;
    Ok(Arc::new(storage))
}

pub async fn create_storage(kind: &str, url: Option<&str>) -> Result<Arc<dyn RecordStorage>> {
    let storage = match kind {
        "memory" => open::<InMemoryStorage>(url).await?,
        #[cfg(feature = "sqlite")]
        "sqlite" => open::<SQLiteStorage>(url).await?,
        other => {
            return Err(Error::Storage(format!(
                "Unknown storage backend '{}', expected one of: {}",
                other,
                STORAGE_KINDS.join(", ")
            )))
        }
    };
    info!("🏦 Storage backend initialized (using {})", kind);
    Ok(storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_memory_storage() {
        let storage = create_storage("memory", None).await.unwrap();
        assert!(storage.find_singleton().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_unknown_storage() {
        let result = create_storage("mongodb", None).await;
        match result {
            Err(Error::Storage(message)) => assert!(message.contains("memory")),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }
    }
}
