use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything one full scrape produces. Persisted as a singleton and
/// overwritten on every successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsRecord {
    pub news_title: Option<String>,
    pub news_paragraph: Option<String>,
    pub featured_image: Option<String>,
    /// Facts table, already rendered to embeddable markup.
    pub facts: Option<String>,
    pub hemispheres: Vec<HemisphereEntry>,
    #[serde(default)]
    pub weather: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl MarsRecord {
    /// Same content, ignoring when it was scraped.
    pub fn same_content(&self, other: &MarsRecord) -> bool {
        self.news_title == other.news_title
            && self.news_paragraph == other.news_paragraph
            && self.featured_image == other.featured_image
            && self.facts == other.facts
            && self.hemispheres == other.hemispheres
            && self.weather == other.weather
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HemisphereEntry {
    pub image_url: String,
    pub title: String,
}

/// How an extractor points at an element in the current page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    Css(String),
    /// An `<a>` whose visible text contains the given fragment.
    PartialLinkText(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Css(selector) => write!(f, "{}", selector),
            Locator::PartialLinkText(text) => write!(f, "link containing {:?}", text),
        }
    }
}
