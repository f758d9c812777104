use std::sync::Arc;
use mars_core::{RecordSource, RecordStorage};
use tokio::sync::Mutex;

pub struct AppState {
    pub storage: Arc<dyn RecordStorage>,
    pub source: Arc<dyn RecordSource>,
    /// Held for the duration of a scrape so only one browser runs at a time.
    pub scrape_lock: Mutex<()>,
}

impl AppState {
    pub fn new(storage: Arc<dyn RecordStorage>, source: Arc<dyn RecordSource>) -> Self {
        Self {
            storage,
            source,
            scrape_lock: Mutex::new(()),
        }
    }
}
