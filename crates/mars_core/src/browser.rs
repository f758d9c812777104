use async_trait::async_trait;
use std::time::Duration;
use crate::types::Locator;
use crate::Result;

/// A controllable browser tab. Extractors borrow it one at a time.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to `url` and wait for the load to settle
    async fn visit(&mut self, url: &str) -> Result<()>;

    /// Rendered markup of the current page
    async fn html(&mut self) -> Result<String>;

    /// URL of the current page
    async fn current_url(&mut self) -> Result<String>;

    /// Click the first element matching `locator`. Returns false when nothing matched.
    async fn click(&mut self, locator: &Locator) -> Result<bool>;

    /// Poll for `locator` for at most `timeout`. Returns whether it showed up.
    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> Result<bool>;

    /// Release the underlying browser
    async fn close(&mut self) -> Result<()>;
}

/// Rows of the first table found at a URL, cells as text.
pub type TableGrid = Vec<Vec<String>>;

#[async_trait]
pub trait TableSource: Send + Sync {
    /// `Ok(None)` when the page has no table at all
    async fn fetch_first_table(&self, url: &str) -> Result<Option<TableGrid>>;
}
