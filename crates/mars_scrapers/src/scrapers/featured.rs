use mars_core::{BrowserSession, Locator, Result};
use scraper::Html;

use super::{utils, FEATURED_IMG};
use crate::config::ScrapeConfig;
use crate::logging::Logger;

const FULL_IMAGE_ID: &str = "full_image";
const MORE_INFO_TEXT: &str = "more info";

/// Clicks through the gallery to the image detail page and returns the
/// absolute URL of the full-size featured image.
///
/// A click target that is not on the page means the gallery changed shape,
/// which is treated like any other missing markup: `Ok(None)`.
pub async fn featured_image(
    session: &mut dyn BrowserSession,
    config: &ScrapeConfig,
) -> Result<Option<String>> {
    let log = Logger::new().with_prefix("🖼️ [featured]");

    session.visit(&config.featured_url).await?;

    if !session.click(&Locator::id(FULL_IMAGE_ID)).await? {
        log.warn("No full image button on the gallery page");
        return Ok(None);
    }

    let more_info = Locator::partial_link_text(MORE_INFO_TEXT);
    session.wait_for(&more_info, config.wait_timeout).await?;
    if !session.click(&more_info).await? {
        log.warn("No 'more info' link after opening the full image");
        return Ok(None);
    }

    let html = session.html().await?;
    let image = parse_featured_image(&html, &config.featured_base);
    match &image {
        Some(url) => log.info(&format!("Featured image: {}", url)),
        None => log.warn("Detail page has no figure.lede image"),
    }
    Ok(image)
}

/// `src` of `figure.lede a img`, resolved against `base`.
pub fn parse_featured_image(html: &str, base: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let src = document
        .select(&FEATURED_IMG)
        .next()
        .and_then(|img| img.value().attr("src"))?;

    utils::resolve(base, src).ok()
}
