use clap::{Args, Subcommand, ValueEnum};
use mars_core::{RecordSource, Result};
use serde_json::{json, Value};

use crate::manager::{close_quietly, ScraperManager};
use crate::scrapers::{featured_image, hemispheres, mars_facts, mars_news, mars_weather};

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Run a single extractor and print what it found
    Only {
        #[arg(value_enum)]
        fragment: Fragment,
    },
    /// List the extractors and the pages they read
    List,
}

/// One piece of the record, scrapable on its own.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    News,
    FeaturedImage,
    Facts,
    Hemispheres,
    Weather,
}

impl Fragment {
    pub const ALL: [Fragment; 5] = [
        Fragment::News,
        Fragment::FeaturedImage,
        Fragment::Facts,
        Fragment::Hemispheres,
        Fragment::Weather,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Fragment::News => "news",
            Fragment::FeaturedImage => "featured-image",
            Fragment::Facts => "facts",
            Fragment::Hemispheres => "hemispheres",
            Fragment::Weather => "weather",
        }
    }

    pub fn source_url<'a>(&self, manager: &'a ScraperManager) -> &'a str {
        let config = manager.config();
        match self {
            Fragment::News => &config.news_url,
            Fragment::FeaturedImage => &config.featured_url,
            Fragment::Facts => &config.facts_url,
            Fragment::Hemispheres => &config.hemispheres_url,
            Fragment::Weather => &config.weather_url,
        }
    }
}

/// Scrapes just `fragment`. Facts go over plain HTTP; the rest get their own
/// browser session, closed before returning.
pub async fn scrape_fragment(fragment: Fragment, manager: &ScraperManager) -> Result<Value> {
    let config = manager.config();

    match fragment {
        Fragment::Facts => Ok(json!({ "facts": mars_facts(manager.tables(), config).await })),
        Fragment::News => {
            let mut session = manager.open_session().await?;
            let result = mars_news(session.as_mut(), config).await;
            close_quietly(session).await;
            result.map(|(title, paragraph)| json!({ "news_title": title, "news_paragraph": paragraph }))
        }
        Fragment::FeaturedImage => {
            let mut session = manager.open_session().await?;
            let result = featured_image(session.as_mut(), config).await;
            close_quietly(session).await;
            result.map(|image| json!({ "featured_image": image }))
        }
        Fragment::Hemispheres => {
            let mut session = manager.open_session().await?;
            let result = hemispheres(session.as_mut(), config).await;
            close_quietly(session).await;
            result.map(|entries| json!({ "hemispheres": entries }))
        }
        Fragment::Weather => {
            let mut session = manager.open_session().await?;
            let result = mars_weather(session.as_mut(), config).await;
            close_quietly(session).await;
            result.map(|weather| json!({ "weather": weather }))
        }
    }
}

pub async fn handle_command(args: ScraperArgs, manager: &ScraperManager) -> Result<()> {
    match args.command {
        ScraperCommands::Only { fragment } => {
            let value = scrape_fragment(fragment, manager).await?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ScraperCommands::List => {
            println!("Available extractors:");
            for fragment in Fragment::ALL {
                println!("  {:<15} {}", fragment.name(), fragment.source_url(manager));
            }
        }
    }
    Ok(())
}

/// Full scrape, printed as JSON. Used when no storage should be touched.
pub async fn print_record(manager: &ScraperManager) -> Result<()> {
    let record = manager.scrape().await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
