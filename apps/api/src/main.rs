mod config;
mod db;
mod diagnosis;
mod errors;
mod leads;
mod models;
mod routes;
mod state;
mod wizard;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::wizard::guard::{CompletionGuard, InProcessCompletionGuard, RedisCompletionGuard};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bizzer API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Diagnosis catalog {} (default language: {})",
        diagnosis::CATALOG_VERSION,
        config.default_language
    );

    // Initialize PostgreSQL and apply migrations
    let db = create_pool(&config.database_url, config.db_max_connections).await?;

    // Completion guard: Redis lease when configured, in-process otherwise
    let ttl = Duration::from_secs(config.completion_lock_ttl_secs);
    let completion_guard: Arc<dyn CompletionGuard> = match &config.redis_url {
        Some(url) => {
            info!("Completion guard: Redis (lease TTL {}s)", ttl.as_secs());
            Arc::new(RedisCompletionGuard::new(url, ttl)?)
        }
        None => {
            info!("Completion guard: in-process (REDIS_URL not set)");
            Arc::new(InProcessCompletionGuard::default())
        }
    };

    let state = AppState {
        db,
        config: config.clone(),
        completion_guard,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the marketing site domains

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
