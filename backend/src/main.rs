//! Main entry point for the LibBuddy backend.
//!
//! This file initializes the Axum web server, sets up the database
//! connection, and registers all API routes and middleware.

use backend::config::Config;
use backend::database::Database;
use backend::state::AppState;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let state = AppState::new(db.pool().clone(), &config)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let app = backend::app(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting LibBuddy server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    Ok(())
}
