use mars_core::{BrowserSession, Result};
use scraper::Html;

use super::WEATHER_TABLE;
use crate::config::ScrapeConfig;
use crate::fetcher::fetch_page;
use crate::logging::Logger;

/// Markup of the InSight daily weather report table.
pub async fn mars_weather(
    session: &mut dyn BrowserSession,
    config: &ScrapeConfig,
) -> Result<Option<String>> {
    let log = Logger::new().with_prefix("🌡️ [weather]");

    let html = fetch_page(session, &config.weather_url, None).await?;
    let table = parse_weather_table(&html);
    if table.is_none() {
        log.warn("No weather table on the page");
    }
    Ok(table)
}

pub fn parse_weather_table(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document.select(&WEATHER_TABLE).next().map(|table| table.html())
}
