use async_trait::async_trait;
use lazy_static::lazy_static;
use mars_core::{Result, TableGrid, TableSource};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::debug;

use crate::scrapers::{selector, utils};

lazy_static! {
    static ref TABLE: Selector = selector("table");
    static ref ROW: Selector = selector("tr");
    static ref CELL: Selector = selector("th, td");
}

/// Filler for cells a short row does not have.
pub const MISSING_CELL: &str = "NaN";

/// Reads tables straight over HTTP, without a browser.
#[derive(Debug, Clone)]
pub struct HttpTableSource {
    client: reqwest::Client,
}

impl HttpTableSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mars_scrapers/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn fetch_first_table(&self, url: &str) -> Result<Option<TableGrid>> {
        debug!("Fetching tables from {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(parse_first_table(&html))
    }
}

/// Body rows of the first `<table>` in the document.
///
/// Leading header rows (inside `thead`, or made only of `th` cells) are
/// skipped. Rows shorter than the widest one are padded with [`MISSING_CELL`].
pub fn parse_first_table(html: &str) -> Option<TableGrid> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next()?;

    let mut grid: TableGrid = Vec::new();
    for row in table.select(&ROW) {
        let cells: Vec<ElementRef> = row.select(&CELL).collect();
        if cells.is_empty() {
            continue;
        }
        if grid.is_empty() && is_header_row(&row, &cells) {
            continue;
        }
        grid.push(cells.iter().map(utils::element_text).collect());
    }

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in grid.iter_mut() {
        row.resize(width, MISSING_CELL.to_string());
    }
    Some(grid)
}

fn is_header_row(row: &ElementRef<'_>, cells: &[ElementRef<'_>]) -> bool {
    let in_thead = row
        .parent()
        .and_then(ElementRef::wrap)
        .map(|parent| parent.value().name() == "thead")
        .unwrap_or(false);
    in_thead || cells.iter().all(|cell| cell.value().name() == "th")
}
