//! HTTP server entry point.
//!
//! Loads configuration from the environment (and `.env`), wires the Workers AI
//! binding into shared state and serves the router.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use toolcall_server::{build_router, db, ServerConfig, ServerState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    info!("Loaded config: {:?}", config);

    let addr = config.bind_addr.clone();
    let database_url = config.database_url.clone();

    let mut state = ServerState::with_workers_ai(config);
    match database_url {
        Some(path) => {
            let conn = db::init_db(&path).context("failed to initialize users database")?;
            state = state.with_users_db(conn);
            info!("Users listing enabled");
        }
        None => info!("DATABASE_URL not set, users listing disabled"),
    }

    let app = build_router(Arc::new(state));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
