mod colleges;
mod config;
mod db;
mod enrichment;
mod errors;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::colleges::repository::PgCollegeRepository;
use crate::config::Config;
use crate::db::create_pool;
use crate::enrichment::aggregator::EnrichmentAggregator;
use crate::enrichment::build_http_client;
use crate::enrichment::directory::HipolabsClient;
use crate::enrichment::summary::WikipediaClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting college enrichment API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let colleges = Arc::new(PgCollegeRepository::new(db));

    // Initialize enrichment providers
    let enrichment = &config.enrichment;
    let http = build_http_client(enrichment.provider_timeout)
        .context("Failed to build outbound HTTP client")?;
    let directory = HipolabsClient::new(
        http.clone(),
        &enrichment.directory_base_url,
        &enrichment.directory_country,
    );
    let summaries = WikipediaClient::new(http, &enrichment.summary_base_url);
    info!(
        "Enrichment providers: directory={} (country={}), summary={}, timeout={}ms",
        enrichment.directory_base_url,
        enrichment.directory_country,
        enrichment.summary_base_url,
        enrichment.provider_timeout.as_millis()
    );

    let enricher = EnrichmentAggregator::new(
        colleges.clone(),
        Arc::new(directory),
        Arc::new(summaries),
        enrichment.provider_timeout,
    );

    // Build app state
    let state = AppState {
        colleges,
        enricher: Arc::new(enricher),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the frontend host once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
