//! [`BrowserSession`] backed by a headless Chrome tab.
//!
//! headless_chrome blocks on its websocket, so every call runs on the blocking
//! pool against a shared handle to the tab.

use async_trait::async_trait;
use headless_chrome::browser::tab::NoElementFound;
use headless_chrome::{Browser, LaunchOptions, Tab};
use mars_core::{BrowserSession, Error, Locator, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// How a [`Locator`] is looked up in the DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Query {
    Css(String),
    XPath(String),
}

impl From<&Locator> for Query {
    fn from(locator: &Locator) -> Self {
        match locator {
            Locator::Id(id) => Query::XPath(format!("//*[@id={}]", xpath_literal(id))),
            Locator::Css(css) => Query::Css(css.clone()),
            Locator::PartialLinkText(text) => {
                Query::XPath(format!("//a[contains(normalize-space(.), {})]", xpath_literal(text.trim())))
            }
        }
    }
}

/// Quotes `value` for use inside an XPath expression.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{}'", value)
    } else if !value.contains('"') {
        format!("\"{}\"", value)
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{}'", part)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// `Ok(None)` when the lookup found nothing; any other failure is kept.
fn present<T>(found: anyhow::Result<T>) -> anyhow::Result<Option<T>> {
    match found {
        Ok(element) => Ok(Some(element)),
        Err(e) if e.downcast_ref::<NoElementFound>().is_some() => Ok(None),
        Err(e) => Err(e),
    }
}

pub struct ChromeSession {
    browser: Option<Browser>,
    tab: Arc<Tab>,
}

impl ChromeSession {
    /// Starts a Chrome process with a single tab. Blocking.
    pub fn launch(headless: bool) -> Result<Self> {
        let browser = Browser::new(LaunchOptions {
            headless,
            ..Default::default()
        })
        .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::Browser(format!("Failed to open tab: {}", e)))?;

        Ok(Self {
            browser: Some(browser),
            tab,
        })
    }

    fn tab(&self) -> Result<Arc<Tab>> {
        if self.browser.is_none() {
            return Err(Error::Browser("session already closed".to_string()));
        }
        Ok(self.tab.clone())
    }
}

async fn on_tab<T, F>(tab: Arc<Tab>, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Tab) -> anyhow::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&tab))
        .await
        .map_err(|e| Error::Browser(format!("Browser task failed: {}", e)))?
        .map_err(|e| Error::Browser(e.to_string()))
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn visit(&mut self, url: &str) -> Result<()> {
        debug!("Visiting {}", url);
        let url = url.to_string();
        on_tab(self.tab()?, move |tab| {
            tab.navigate_to(&url)?.wait_until_navigated()?;
            Ok(())
        })
        .await
    }

    async fn html(&mut self) -> Result<String> {
        on_tab(self.tab()?, |tab| tab.get_content()).await
    }

    async fn current_url(&mut self) -> Result<String> {
        on_tab(self.tab()?, |tab| Ok(tab.get_url())).await
    }

    async fn click(&mut self, locator: &Locator) -> Result<bool> {
        let query = Query::from(locator);
        on_tab(self.tab()?, move |tab| {
            let found = match &query {
                Query::Css(css) => tab.find_element(css),
                Query::XPath(xpath) => tab.find_element_by_xpath(xpath),
            };
            let Some(element) = present(found)? else {
                return Ok(false);
            };
            element.click()?;
            tab.wait_until_navigated()?;
            Ok(true)
        })
        .await
    }

    async fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> Result<bool> {
        let query = Query::from(locator);
        on_tab(self.tab()?, move |tab| {
            let found = match &query {
                Query::Css(css) => tab.wait_for_element_with_custom_timeout(css, timeout).is_ok(),
                Query::XPath(xpath) => tab.wait_for_xpath_with_custom_timeout(xpath, timeout).is_ok(),
            };
            Ok(found)
        })
        .await
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(browser) = self.browser.take() {
            debug!("Closing browser");
            // dropping the handle kills the Chrome process
            tokio::task::spawn_blocking(move || drop(browser))
                .await
                .map_err(|e| Error::Browser(format!("Failed to close browser: {}", e)))?;
        }
        Ok(())
    }
}
