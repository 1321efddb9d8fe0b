mod admin;
mod auth;
mod config;
mod db;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreBackend};
use crate::db::create_pool;
use crate::interview::gateway::LlmGateway;
use crate::interview::service::InterviewService;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::store::{MemoryRecordStore, PgRecordStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentScout API v{}", env!("CARGO_PKG_VERSION"));

    let (records, sessions) = build_stores(&config).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    let interviews = InterviewService::new(sessions, records.clone(), Arc::new(LlmGateway(llm)));

    let state = AppState {
        records,
        interviews,
        config: Arc::new(config.clone()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Record store + session store for the configured backend.
async fn build_stores(config: &Config) -> Result<(Arc<dyn RecordStore>, Arc<dyn SessionStore>)> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let pool = create_pool(database_url).await?;

            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the postgres backend")?;
            let redis = redis::Client::open(redis_url)?;
            info!(
                "Redis session store initialized (ttl: {}s)",
                config.session_ttl_secs
            );

            let records: Arc<dyn RecordStore> =
                Arc::new(PgRecordStore::new(pool, config.token_ttl()));
            let sessions: Arc<dyn SessionStore> =
                Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs));
            Ok((records, sessions))
        }
        StoreBackend::Memory => {
            info!("Using in-memory stores; data is lost on restart");
            let records: Arc<dyn RecordStore> =
                Arc::new(MemoryRecordStore::new().with_token_ttl(config.token_ttl()));
            let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
            Ok((records, sessions))
        }
    }
}
