mod config;
mod errors;
mod extraction;
mod history;
mod models;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::history::{HistoryStore, JsonFileHistoryStore, PgHistoryStore};
use crate::routes::build_router;
use crate::screening::pipeline::Screener;
use crate::screening::segmenter::RuleBasedSegmenter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting résumé screener v{}", env!("CARGO_PKG_VERSION"));

    // Transient uploads live here only while their text is extracted
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Cannot create upload dir '{}'", config.upload_dir.display()))?;

    let history: Arc<dyn HistoryStore> = match &config.database_url {
        Some(url) => Arc::new(PgHistoryStore::connect(url).await?),
        None => {
            let store = JsonFileHistoryStore::new(&config.history_file);
            info!("History file: {}", store.path().display());
            Arc::new(store)
        }
    };

    let screener = Arc::new(Screener::new(
        Arc::new(RuleBasedSegmenter::default()),
        &config.upload_dir,
    ));
    info!("Upload dir: {}", screener.upload_dir().display());

    let state = AppState { screener, history };

    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
