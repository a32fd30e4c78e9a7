mod company_info;
mod config;
mod db;
mod errors;
mod evaluation;
mod llm_client;
mod logo;
mod models;
mod research;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::company_info::store::PgCompanyInfoStore;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::evaluation::store::PgEvaluationStore;
use crate::llm_client::LlmClient;
use crate::logo::throttle::{CallGate, LocalGate, RedisGate};
use crate::logo::{BrandfetchClient, LogoProvider};
use crate::research::PerplexityResearcher;
use crate::routes::build_router;
use crate::state::AppState;

const LOGO_GATE_KEY: &str = "compass:brandfetch:last_call";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.perplexity_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let logos = build_logo_provider(&config)?;

    // Build app state
    let state = AppState {
        companies: Arc::new(PgCompanyInfoStore::new(db.clone())),
        evaluations: Arc::new(PgEvaluationStore::new(db)),
        research: Arc::new(PerplexityResearcher::new(llm)),
        logos,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Brandfetch client behind the configured call gate, or `None` without an API key.
fn build_logo_provider(config: &Config) -> Result<Option<Arc<dyn LogoProvider>>> {
    let Some(api_key) = config.brandfetch_api_key.clone() else {
        info!("BRANDFETCH_API_KEY not set; logo fetching disabled");
        return Ok(None);
    };

    let interval = Duration::from_millis(config.brandfetch_min_interval_ms);
    let gate: Arc<dyn CallGate> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!("Logo call gate: Redis ({}ms interval)", interval.as_millis());
            Arc::new(RedisGate::new(client, LOGO_GATE_KEY, interval))
        }
        None => {
            info!("Logo call gate: in-process ({}ms interval)", interval.as_millis());
            Arc::new(LocalGate::new(interval)?)
        }
    };

    let provider: Arc<dyn LogoProvider> = Arc::new(BrandfetchClient::new(api_key, gate));
    Ok(Some(provider))
}
