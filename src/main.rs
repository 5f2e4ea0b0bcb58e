//! event-registration server entry point.
//!
//! Loads the desk from the configured store and starts the Axum HTTP
//! server with REST and WebSocket endpoints.

use std::time::Duration;

use anyhow::Context;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use event_registration::api;
use event_registration::app_state::AppState;
use event_registration::config::{LogFormat, RegistrationConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistrationConfig::from_env()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    tracing::info!(
        addr = %config.listen_addr,
        backend = ?config.store_backend,
        "starting event-registration"
    );

    let (app_state, report) =
        AppState::from_config(&config).context("failed to load registration desk")?;
    tracing::info!(?report, "registration desk ready");

    let app = api::build_app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
