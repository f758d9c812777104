use lazy_static::lazy_static;
use scraper::Selector;

pub mod facts;
pub mod featured;
pub mod hemispheres;
pub mod news;
pub mod weather;

pub use facts::{mars_facts, FactsTable};
pub use featured::featured_image;
pub use hemispheres::{hemispheres, HemisphereLink};
pub use news::mars_news;
pub use weather::mars_weather;

lazy_static! {
    pub(crate) static ref NEWS_SLIDE: Selector = selector("ul.item_list li.slide");
    pub(crate) static ref NEWS_TITLE: Selector = selector("div.content_title");
    pub(crate) static ref NEWS_TEASER: Selector = selector("div.article_teaser_body");
    pub(crate) static ref FEATURED_IMG: Selector = selector("figure.lede a img");
    pub(crate) static ref HEMISPHERE_ITEM: Selector = selector("div.item");
    pub(crate) static ref ANCHOR_HREF: Selector = selector("a[href]");
    pub(crate) static ref HEADING_3: Selector = selector("h3");
    pub(crate) static ref DOWNLOAD_LINK: Selector = selector("div.downloads a[href]");
    pub(crate) static ref WEATHER_TABLE: Selector = selector("table.mb_table");
}

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {:?}: {:?}", css, e))
}

/// Common utilities for extractors
pub mod utils {
    use mars_core::{Error, Result};
    use scraper::ElementRef;
    use url::Url;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Resolves `href` against `base`. Absolute hrefs pass through unchanged.
    pub fn resolve(base: &str, href: &str) -> Result<String> {
        let base = parse_url(base)?;
        let joined = base
            .join(href.trim())
            .map_err(|e| Error::InvalidUrl(format!("{} relative to {}: {}", href, base, e)))?;
        Ok(joined.to_string())
    }

    /// Visible text of an element with whitespace runs collapsed.
    pub fn element_text(element: &ElementRef<'_>) -> String {
        element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn escape_html(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}
