use std::time::Duration;
use mars_core::{BrowserSession, Locator, Result};
use tracing::debug;

/// Element to poll for after navigation, bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct WaitFor {
    pub locator: Locator,
    pub timeout: Duration,
}

impl WaitFor {
    pub fn new(locator: Locator, timeout: Duration) -> Self {
        Self { locator, timeout }
    }
}

/// Navigates `session` to `url` and returns the rendered markup.
///
/// A wait that runs out is not an error: the page is read as it stands, and
/// the extractor decides what a missing element means.
pub async fn fetch_page(
    session: &mut dyn BrowserSession,
    url: &str,
    wait: Option<&WaitFor>,
) -> Result<String> {
    session.visit(url).await?;

    if let Some(wait) = wait {
        if !session.wait_for(&wait.locator, wait.timeout).await? {
            debug!("{} not present on {} after {:?}", wait.locator, url, wait.timeout);
        }
    }

    session.html().await
}
