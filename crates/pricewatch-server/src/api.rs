//! Liveness routes. They keep the process reachable on hosts that expect an
//! HTTP listener; scraping runs entirely off the scheduler.

use axum::{routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub const INDEX_TEXT: &str = "Hello, this is your web scraper running!";

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

pub fn build_app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

async fn index() -> &'static str {
    INDEX_TEXT
}

async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "ok",
        timestamp: Utc::now(),
    })
}
