//! Telegram Ingestion Service - webhook receiver for Telegram channels.
//!
//! This binary:
//! - Receives channel post updates from Telegram
//! - Verifies the webhook secret token
//! - Normalizes each post and dispatches it to the configured output handler
//! - Answers Telegram immediately, whatever the handler does

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tgingest::web::VERSION;
use tgingest::{build_router, AppState, Config, HandlerRegistry, Pipeline, PipelineSettings, Publisher};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Configuration comes first so LOG_LEVEL can drive the filter
    let config = Config::from_env().context("Invalid configuration")?;

    // Initialize structured JSON logging; RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!(version = VERSION, "web_server_starting");
    config.log_summary();

    // The queue handler's publisher connects lazily, on first publish
    let publisher = Publisher::new(config.amqp_url.clone(), config.amqp_queue.clone());
    let registry = HandlerRegistry::standard(publisher.clone());
    info!(handlers = ?registry.names(), "handler_registry_built");

    let pipeline = Pipeline::new(PipelineSettings::from_config(&config), registry);
    let app = build_router(AppState::new(pipeline, config.max_body_bytes));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(address = %addr, "web_server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    publisher.close().await;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
