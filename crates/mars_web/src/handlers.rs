use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::render::render_page;
use crate::AppState;

pub const SCRAPE_SUCCESS: &str = "Scraping Successful!";

/// Turns a core error into a plain-text 500.
pub struct AppError(mars_core::Error);

impl From<mars_core::Error> for AppError {
    fn from(e: mars_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string()).into_response()
    }
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let record = state.storage.find_singleton().await?;
    Ok(Html(render_page(record.as_ref())))
}

/// Runs a fresh scrape and replaces the stored record. Nothing is written if
/// the scrape fails.
pub async fn scrape(State(state): State<Arc<AppState>>) -> Result<&'static str, AppError> {
    let _guard = state.scrape_lock.lock().await;
    info!("🦗 Scrape requested");

    let record = state.source.scrape().await?;
    state.storage.upsert_singleton(&record).await?;

    info!("💾 Stored record from {}", record.last_modified);
    Ok(SCRAPE_SUCCESS)
}

pub async fn get_record(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let response = match state.storage.find_singleton().await? {
        Some(record) => Json(record).into_response(),
        None => (StatusCode::NOT_FOUND, "No record scraped yet").into_response(),
    };
    Ok(response)
}
