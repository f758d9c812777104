use mars_core::{BrowserSession, Error, HemisphereEntry, Result};
use scraper::Html;

use super::{utils, ANCHOR_HREF, DOWNLOAD_LINK, HEADING_3, HEMISPHERE_ITEM};
use crate::config::ScrapeConfig;
use crate::fetcher::fetch_page;
use crate::logging::Logger;

/// One listing item: its title and the detail page it links to, read
/// together so they cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HemisphereLink {
    pub title: String,
    pub url: String,
}

/// Full-resolution image and title for every hemisphere on the search
/// results page, in listing order. Detail pages are visited one at a time.
///
/// A detail page without a download link fails the whole call, so the
/// result always has one entry per listing item.
pub async fn hemispheres(
    session: &mut dyn BrowserSession,
    config: &ScrapeConfig,
) -> Result<Vec<HemisphereEntry>> {
    let log = Logger::new().with_prefix("🌗 [hemispheres]");

    let listing = fetch_page(session, &config.hemispheres_url, None).await?;
    let links = parse_hemisphere_links(&listing, &config.hemispheres_base);
    log.info(&format!("Found {} hemispheres", links.len()));

    let mut entries = Vec::with_capacity(links.len());
    for link in links {
        let detail = fetch_page(session, &link.url, None).await?;
        let page_url = session.current_url().await?;
        let image_url = parse_download_link(&detail, &page_url)
            .ok_or_else(|| Error::Scraping(format!("no download link at {}", link.url)))?;
        log.debug(&format!("{} -> {}", link.title, image_url));
        entries.push(HemisphereEntry {
            image_url,
            title: link.title,
        });
    }

    Ok(entries)
}

/// Every `div.item` with both a link and an `h3` title. Items missing either
/// are dropped rather than shifting later pairs.
pub fn parse_hemisphere_links(html: &str, base: &str) -> Vec<HemisphereLink> {
    let document = Html::parse_document(html);

    document
        .select(&HEMISPHERE_ITEM)
        .filter_map(|item| {
            let href = item.select(&ANCHOR_HREF).next()?.value().attr("href")?;
            let title = item.select(&HEADING_3).next().map(|h3| utils::element_text(&h3))?;
            if title.is_empty() {
                return None;
            }
            let url = utils::resolve(base, href).ok()?;
            Some(HemisphereLink { title, url })
        })
        .collect()
}

/// First link in the downloads section, resolved against the detail page.
pub fn parse_download_link(html: &str, page_url: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let href = document.select(&DOWNLOAD_LINK).next()?.value().attr("href")?;
    utils::resolve(page_url, href).ok()
}
