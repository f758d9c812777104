use mars_core::{BrowserSession, Locator, Result};
use scraper::Html;

use super::{utils, NEWS_SLIDE, NEWS_TEASER, NEWS_TITLE};
use crate::config::ScrapeConfig;
use crate::fetcher::{fetch_page, WaitFor};
use crate::logging::Logger;

/// Latest headline and teaser from the news listing.
pub async fn mars_news(
    session: &mut dyn BrowserSession,
    config: &ScrapeConfig,
) -> Result<(Option<String>, Option<String>)> {
    let log = Logger::new().with_prefix("📰 [news]");
    let wait = WaitFor::new(Locator::css("ul.item_list li.slide"), config.wait_timeout);

    let html = fetch_page(session, &config.news_url, Some(&wait)).await?;
    let (title, paragraph) = parse_news(&html);

    match &title {
        Some(title) => log.info(&format!("Latest article: {}", title)),
        None => log.warn("No article slide found, leaving news empty"),
    }
    Ok((title, paragraph))
}

/// The first slide is the most recent article. Both fields or neither.
pub fn parse_news(html: &str) -> (Option<String>, Option<String>) {
    let document = Html::parse_document(html);

    let Some(slide) = document.select(&NEWS_SLIDE).next() else {
        return (None, None);
    };

    let title = slide.select(&NEWS_TITLE).next().map(|el| utils::element_text(&el));
    let teaser = slide.select(&NEWS_TEASER).next().map(|el| utils::element_text(&el));

    match (title, teaser) {
        (Some(title), Some(teaser)) => (Some(title), Some(teaser)),
        _ => (None, None),
    }
}
