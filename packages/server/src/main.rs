use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use server::config::{AppConfig, CorsConfig};
use server::state::AppState;

fn cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(config.max_age));

    if config.allow_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allow_origins
        .iter()
        .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin '{o}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let db = server::database::init_db(&config.database)
        .await
        .context("failed to connect to the database")?;
    info!("Connected to database");

    server::seed::ensure_indexes(&db)
        .await
        .context("failed to ensure indexes")?;

    let cors = cors_layer(&config.server.cors)?;
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = AppState {
        db: db.clone(),
        config,
    };
    let app = server::build_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await.context("failed to close the database")?;
    info!("Database connection closed");

    Ok(())
}
