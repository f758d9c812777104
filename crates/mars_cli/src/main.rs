use clap::Parser;
use mars_core::{RecordSource, RecordStorage, Result};
use mars_scrapers::logging::init_logging;
use mars_scrapers::{ScrapeConfig, ScraperArgs, ScraperManager};
use mars_web::AppState;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    'd' => 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = add_seconds(total_seconds, &current_number, unit)?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // a trailing bare number counts as seconds
        if !current_number.is_empty() {
            total_seconds = add_seconds(total_seconds, &current_number, 1)?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be longer than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

fn add_seconds(total: u64, digits: &str, unit: u64) -> std::result::Result<u64, String> {
    digits
        .parse::<u64>()
        .ok()
        .and_then(|num| num.checked_mul(unit))
        .and_then(|seconds| total.checked_add(seconds))
        .ok_or_else(|| "Duration too large".to_string())
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape Mars news, images and facts, and serve them", long_about = None)]
struct Cli {
    /// Where the scraped record is kept: memory or sqlite
    #[arg(long, default_value = "memory")]
    storage: String,
    /// Backend specific location, e.g. sqlite://mars.db
    #[arg(long)]
    database_url: Option<String>,
    /// Show the Chrome window instead of running headless
    #[arg(long)]
    headed: bool,
    /// Seconds to wait for late page elements
    #[arg(long, default_value_t = 1)]
    wait_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the full scrape and store the result
    Scrape {
        /// Keep scraping on this interval (e.g. 1h, 30m, 1h15m30s)
        #[arg(long)]
        interval: Option<HumanDuration>,
        /// Print the record instead of storing it
        #[arg(long)]
        no_store: bool,
    },
    /// Work with individual extractors
    Extract(ScraperArgs),
    /// Serve the stored record and the /scrape trigger
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
}

async fn scrape_once(manager: &ScraperManager, storage: &Arc<dyn RecordStorage>) -> Result<()> {
    let record = manager.scrape().await?;
    storage.upsert_singleton(&record).await?;
    info!("💾 Record stored ({} hemispheres)", record.hemispheres.len());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = ScrapeConfig::default()
        .with_headless(!cli.headed)
        .with_wait_timeout(Duration::from_secs(cli.wait_secs));
    let manager = ScraperManager::new(config)?;

    match cli.command {
        Commands::Extract(args) => {
            mars_scrapers::handle_command(args, &manager).await?;
        }
        Commands::Scrape { no_store: true, .. } => {
            mars_scrapers::cli::print_record(&manager).await?;
        }
        Commands::Scrape { interval, .. } => {
            let storage = mars_storage::create_storage(&cli.storage, cli.database_url.as_deref()).await?;
            match interval {
                Some(interval) => {
                    info!("Running in periodic mode with {}s interval", interval.0.as_secs());
                    loop {
                        if let Err(e) = scrape_once(&manager, &storage).await {
                            error!("Scrape failed, keeping the previous record: {}", e);
                        }
                        info!("Waiting {}s before next scrape", interval.0.as_secs());
                        tokio::time::sleep(interval.0).await;
                    }
                }
                None => scrape_once(&manager, &storage).await?,
            }
        }
        Commands::Serve { addr } => {
            let storage = mars_storage::create_storage(&cli.storage, cli.database_url.as_deref()).await?;
            let state = AppState::new(storage, Arc::new(manager));
            mars_web::serve(state, addr).await?;
        }
    }

    Ok(())
}
