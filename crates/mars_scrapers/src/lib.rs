pub mod browser;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod logging;
pub mod manager;
pub mod scrapers;
pub mod tables;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::ChromeSession;
pub use cli::{handle_command, Fragment, ScraperArgs, ScraperCommands};
pub use config::ScrapeConfig;
pub use fetcher::{fetch_page, WaitFor};
pub use manager::{scrape_all, ScraperManager, SessionFactory};
pub use scrapers::utils::escape_html;
pub use tables::HttpTableSource;
