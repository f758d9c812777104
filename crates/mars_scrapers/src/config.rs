use std::time::Duration;

pub const NEWS_URL: &str = "https://mars.nasa.gov/news/";
pub const FEATURED_URL: &str = "https://www.jpl.nasa.gov/spaceimages/?search=&category=Mars";
pub const FEATURED_BASE: &str = "https://www.jpl.nasa.gov";
pub const FACTS_URL: &str = "http://space-facts.com/mars/";
pub const HEMISPHERES_URL: &str =
    "https://astrogeology.usgs.gov/search/results?q=hemisphere+enhanced&k1=target&v1=Mars";
pub const HEMISPHERES_BASE: &str = "https://astrogeology.usgs.gov";
pub const WEATHER_URL: &str = "https://mars.nasa.gov/insight/weather/";

/// Where each fragment is scraped from and how long to wait for late elements.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub news_url: String,
    pub featured_url: String,
    /// Relative featured image paths are resolved against this
    pub featured_base: String,
    pub facts_url: String,
    pub hemispheres_url: String,
    pub hemispheres_base: String,
    pub weather_url: String,
    pub wait_timeout: Duration,
    pub headless: bool,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            news_url: NEWS_URL.to_string(),
            featured_url: FEATURED_URL.to_string(),
            featured_base: FEATURED_BASE.to_string(),
            facts_url: FACTS_URL.to_string(),
            hemispheres_url: HEMISPHERES_URL.to_string(),
            hemispheres_base: HEMISPHERES_BASE.to_string(),
            weather_url: WEATHER_URL.to_string(),
            wait_timeout: Duration::from_secs(1),
            headless: true,
        }
    }
}

impl ScrapeConfig {
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}
