//! In-memory stand-ins for the browser and the table fetcher.

use async_trait::async_trait;
use mars_core::{BrowserSession, Error, Locator, Result, TableGrid, TableSource};
use scraper::{Html, Selector};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::config::ScrapeConfig;

/// A scripted browser: pages keyed by URL, clicks keyed by the page they
/// happen on and what they target.
#[derive(Debug, Default)]
pub struct FakeSession {
    pages: HashMap<String, String>,
    transitions: HashMap<(String, Locator), String>,
    unreachable: HashSet<String>,
    current: Option<String>,
    visited: Vec<String>,
    closed: Arc<AtomicBool>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Clicking `locator` while on `from` navigates to `to`.
    pub fn with_click(mut self, from: &str, locator: Locator, to: &str) -> Self {
        self.transitions.insert((from.to_string(), locator), to.to_string());
        self
    }

    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.clone()
    }

    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        self.closed.clone()
    }

    fn current_html(&self) -> &str {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .map(String::as_str)
            .unwrap_or("<html><body></body></html>")
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::Browser("session already closed".to_string()));
        }
        if self.unreachable.contains(url) {
            return Err(Error::Browser(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        }
        self.visited.push(url.to_string());
        self.current = Some(url.to_string());
        Ok(())
    }
}

fn is_present(html: &str, locator: &Locator) -> bool {
    let document = Html::parse_document(html);
    match locator {
        Locator::Id(id) => Selector::parse(&format!("#{}", id))
            .map(|s| document.select(&s).next().is_some())
            .unwrap_or(false),
        Locator::Css(css) => Selector::parse(css)
            .map(|s| document.select(&s).next().is_some())
            .unwrap_or(false),
        Locator::PartialLinkText(text) => {
            let anchors = Selector::parse("a").unwrap();
            document
                .select(&anchors)
                .any(|a| a.text().collect::<String>().contains(text.as_str()))
        }
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn visit(&mut self, url: &str) -> Result<()> {
        self.navigate(url)
    }

    async fn html(&mut self) -> Result<String> {
        Ok(self.current_html().to_string())
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.current.clone().unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn click(&mut self, locator: &Locator) -> Result<bool> {
        if !is_present(self.current_html(), locator) {
            return Ok(false);
        }
        let from = self.current.clone().unwrap_or_default();
        if let Some(to) = self.transitions.get(&(from, locator.clone())).cloned() {
            self.navigate(&to)?;
        }
        Ok(true)
    }

    async fn wait_for(&mut self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        Ok(is_present(self.current_html(), locator))
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum FakeTables {
    Grid(TableGrid),
    NoTable,
    Unreachable,
}

#[async_trait]
impl TableSource for FakeTables {
    async fn fetch_first_table(&self, url: &str) -> Result<Option<TableGrid>> {
        match self {
            FakeTables::Grid(grid) => Ok(Some(grid.clone())),
            FakeTables::NoTable => Ok(None),
            FakeTables::Unreachable => Err(Error::Scraping(format!("connection refused: {}", url))),
        }
    }
}

pub fn facts_grid() -> TableGrid {
    vec![
        vec!["Equatorial Diameter:".to_string(), "6,792 km".to_string()],
        vec!["Polar Diameter:".to_string(), "6,752 km".to_string()],
        vec!["Mass:".to_string(), "6.39 × 10^23 kg (0.11 Earths)".to_string()],
    ]
}

pub const NEWS_HTML: &str = r#"
<html><body>
  <ul class="item_list">
    <li class="slide">
      <div class="list_date">November 9, 2020</div>
      <div class="content_title"><a href="/news/8783/">NASA's Perseverance Rover Is Midway to Mars</a></div>
      <div class="article_teaser_body">Sometimes half measures can be a good thing.</div>
    </li>
    <li class="slide">
      <div class="content_title"><a href="/news/8782/">Older Story</a></div>
      <div class="article_teaser_body">Not the latest.</div>
    </li>
  </ul>
</body></html>
"#;

pub const GALLERY_HTML: &str = r#"
<html><body>
  <a class="button fancybox" id="full_image" data-link="/spaceimages/details.php?id=PIA24053">FULL IMAGE</a>
</body></html>
"#;

pub const SLIDESHOW_HTML: &str = r#"
<html><body>
  <div class="fancybox-title"><a class="button" href="/spaceimages/details.php?id=PIA24053">more info     </a></div>
</body></html>
"#;

pub const IMAGE_DETAIL_HTML: &str = r#"
<html><body>
  <figure class="lede">
    <a href="/spaceimages/images/largesize/PIA24053_hires.jpg">
      <img alt="Dunes" src="/spaceimages/images/largesize/PIA24053_hires.jpg" class="main_image">
    </a>
  </figure>
</body></html>
"#;

pub const FACTS_PAGE_HTML: &str = r#"
<html><body>
  <table id="tablepress-p-mars">
    <tbody>
      <tr><td class="column-1"><strong>Equatorial Diameter:</strong></td><td class="column-2">6,792 km</td></tr>
      <tr><td class="column-1"><strong>Polar Diameter:</strong></td><td class="column-2">6,752 km</td></tr>
    </tbody>
  </table>
  <table id="comparison"><tr><td>other</td></tr></table>
</body></html>
"#;

pub const WEATHER_HTML: &str = r#"
<html><body>
  <table class="mb_table" id="weather_observation">
    <tbody><tr><th>Time</th><td>Sol 259</td></tr></tbody>
  </table>
</body></html>
"#;

pub const HEMISPHERE_NAMES: [(&str, &str); 4] = [
    ("cerberus_enhanced", "Cerberus Hemisphere Enhanced"),
    ("schiaparelli_enhanced", "Schiaparelli Hemisphere Enhanced"),
    ("syrtis_major_enhanced", "Syrtis Major Hemisphere Enhanced"),
    ("valles_marineris_enhanced", "Valles Marineris Hemisphere Enhanced"),
];

pub fn hemisphere_listing_html() -> String {
    let items: String = HEMISPHERE_NAMES
        .iter()
        .map(|(slug, title)| {
            format!(
                r#"<div class="item">
                     <a href="/search/map/Mars/Viking/{slug}" class="itemLink product-item"><img class="thumb" src="/cache/{slug}.tif_thumb.png"></a>
                     <div class="description">
                       <a href="/search/map/Mars/Viking/{slug}" class="itemLink product-item"><h3> {title} </h3></a>
                       <span class="subtitle">image/tiff 21 MB</span>
                     </div>
                   </div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="collapsible results">{}</div></body></html>"#, items)
}

pub fn hemisphere_detail_html(slug: &str) -> String {
    format!(
        r#"<html><body>
             <div class="downloads">
               <ul>
                 <li><a target="_blank" href="https://astropedia.astrogeology.usgs.gov/download/Mars/Viking/{slug}.tif/full.jpg">Sample</a></li>
                 <li><a target="_blank" href="https://astropedia.astrogeology.usgs.gov/download/Mars/Viking/{slug}.tif">Original</a></li>
               </ul>
             </div>
           </body></html>"#
    )
}

/// A session that serves a complete, well-formed copy of every page.
pub fn mars_site(config: &ScrapeConfig) -> FakeSession {
    let detail_page = format!("{}/spaceimages/details.php?id=PIA24053", config.featured_base);
    let slideshow = format!("{}#fancybox", config.featured_url);

    let mut session = FakeSession::new()
        .with_page(&config.news_url, NEWS_HTML)
        .with_page(&config.featured_url, GALLERY_HTML)
        .with_page(&slideshow, SLIDESHOW_HTML)
        .with_page(&detail_page, IMAGE_DETAIL_HTML)
        .with_click(&config.featured_url, Locator::id("full_image"), &slideshow)
        .with_click(&slideshow, Locator::partial_link_text("more info"), &detail_page)
        .with_page(&config.hemispheres_url, &hemisphere_listing_html())
        .with_page(&config.weather_url, WEATHER_HTML);

    for (slug, _) in HEMISPHERE_NAMES {
        let url = format!("{}/search/map/Mars/Viking/{}", config.hemispheres_base, slug);
        session = session.with_page(&url, &hemisphere_detail_html(slug));
    }
    session
}
