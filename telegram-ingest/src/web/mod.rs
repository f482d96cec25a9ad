//! Web server module for receiving Telegram webhooks.
//!
//! # Endpoints
//!
//! - `POST /telegram/webhook` - Telegram update delivery
//! - `GET /health` - Liveness probe
//! - `GET /` - Service descriptor

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, root, telegram_webhook, AppState, ErrorResponse, HealthResponse, ServiceInfo,
    WebhookResponse, SERVICE_NAME, VERSION,
};

/// Path Telegram delivers updates to.
pub const WEBHOOK_PATH: &str = "/telegram/webhook";

/// Builds the axum Router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(WEBHOOK_PATH, post(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
