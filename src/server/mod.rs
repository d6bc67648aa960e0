//! HTTP surface.
//!
//! Provides two endpoints:
//! - `POST /seo-analysis` - analyze a URL and return the JSON report
//! - `GET /metrics` - Prometheus-compatible counters
//!
//! The server holds no per-request state; every report is built from scratch.

mod handlers;
mod types;

use std::sync::Arc;

use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::engine::SeoEngine;
use handlers::{analyze_handler, metrics_handler};
pub use types::{AnalyzeRequest, ErrorBody, ServerState};

/// Builds the router over a shared engine.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/seo-analysis", post(analyze_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Binds `bind:port` and serves until the process is stopped.
pub async fn start_server(bind: &str, port: u16, engine: Arc<SeoEngine>) -> anyhow::Result<()> {
    let listener = TcpListener::bind((bind, port))
        .await
        .with_context(|| format!("Failed to bind server to {}:{}", bind, port))?;
    serve(listener, engine).await
}

/// Serves on an already bound listener.
pub async fn serve(listener: TcpListener, engine: Arc<SeoEngine>) -> anyhow::Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read server address")?;
    log::info!("SEO analysis server listening on http://{}/", addr);
    log::info!("  - Analyze: POST http://{}/seo-analysis", addr);
    log::info!("  - Metrics: GET  http://{}/metrics", addr);

    axum::serve(listener, router(ServerState::new(engine)))
        .await
        .context("Server error")
}
