use async_trait::async_trait;
use chrono::Utc;
use mars_core::{BrowserSession, Error, MarsRecord, RecordSource, Result, TableSource};
use std::sync::Arc;
use tracing::{info, warn};

use crate::browser::ChromeSession;
use crate::config::ScrapeConfig;
use crate::scrapers::{featured_image, hemispheres, mars_facts, mars_news, mars_weather};
use crate::tables::HttpTableSource;

/// Opens a fresh browser session for one scrape. Called on the blocking pool.
pub type SessionFactory = Arc<dyn Fn(&ScrapeConfig) -> Result<Box<dyn BrowserSession>> + Send + Sync>;

/// Runs every extractor in order against one borrowed session.
///
/// Missing markup leaves the matching field empty and the run goes on. A
/// browser or network failure in any session-driven step aborts the whole
/// scrape; the facts table is fetched separately and only ever comes back
/// empty.
pub async fn scrape_all(
    session: &mut dyn BrowserSession,
    tables: &dyn TableSource,
    config: &ScrapeConfig,
) -> Result<MarsRecord> {
    info!("🚀 Starting Mars scrape");

    let (news_title, news_paragraph) = mars_news(session, config).await?;
    let featured_image = featured_image(session, config).await?;
    let facts = mars_facts(tables, config).await;
    let hemispheres = hemispheres(session, config).await?;
    let weather = mars_weather(session, config).await?;

    let record = MarsRecord {
        news_title,
        news_paragraph,
        featured_image,
        facts,
        hemispheres,
        weather,
        last_modified: Utc::now(),
    };

    let missing = missing_fragments(&record);
    if missing.is_empty() {
        info!("✨ Scrape complete");
    } else {
        warn!("Scrape complete with empty fragments: {}", missing.join(", "));
    }
    Ok(record)
}

fn missing_fragments(record: &MarsRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.news_title.is_none() {
        missing.push("news");
    }
    if record.featured_image.is_none() {
        missing.push("featured_image");
    }
    if record.facts.is_none() {
        missing.push("facts");
    }
    if record.hemispheres.is_empty() {
        missing.push("hemispheres");
    }
    if record.weather.is_none() {
        missing.push("weather");
    }
    missing
}

pub(crate) async fn close_quietly(mut session: Box<dyn BrowserSession>) {
    if let Err(e) = session.close().await {
        warn!("⚠️ Failed to close browser session: {}", e);
    }
}

fn chrome_factory() -> SessionFactory {
    Arc::new(|config: &ScrapeConfig| -> Result<Box<dyn BrowserSession>> {
        let session = ChromeSession::launch(config.headless)?;
        Ok(Box::new(session) as Box<dyn BrowserSession>)
    })
}

/// Owns the browser lifetime: one session per scrape, always closed.
pub struct ScraperManager {
    config: ScrapeConfig,
    tables: Arc<dyn TableSource>,
    sessions: SessionFactory,
}

impl ScraperManager {
    /// Headless Chrome for pages, plain HTTP for the facts table.
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        Ok(Self {
            config,
            tables: Arc::new(HttpTableSource::new()?),
            sessions: chrome_factory(),
        })
    }

    pub fn with_backends(config: ScrapeConfig, tables: Arc<dyn TableSource>, sessions: SessionFactory) -> Self {
        Self {
            config,
            tables,
            sessions,
        }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    pub fn tables(&self) -> &dyn TableSource {
        self.tables.as_ref()
    }

    /// Opens a session on the blocking pool.
    pub async fn open_session(&self) -> Result<Box<dyn BrowserSession>> {
        let sessions = self.sessions.clone();
        let config = self.config.clone();
        tokio::task::spawn_blocking(move || sessions(&config))
            .await
            .map_err(|e| Error::Browser(format!("Browser launch task failed: {}", e)))?
    }
}

#[async_trait]
impl RecordSource for ScraperManager {
    async fn scrape(&self) -> Result<MarsRecord> {
        let mut session = self.open_session().await?;

        let result = scrape_all(session.as_mut(), self.tables.as_ref(), &self.config).await;
        close_quietly(session).await;
        result
    }
}
