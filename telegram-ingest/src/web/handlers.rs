//! HTTP endpoint handlers.
//!
//! The webhook handler only translates between HTTP and the [`Pipeline`]:
//! it pulls the secret header, reads the body under the size cap, and maps
//! the outcome to a status code and JSON body.

use std::error::Error as StdError;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use http_body_util::LengthLimitError;
use serde::Serialize;
use tracing::warn;

use crate::pipeline::{Pipeline, WebhookError};
use crate::secret::SECRET_HEADER;

/// Service name reported by `/` and `/health`.
pub const SERVICE_NAME: &str = "telegram-ingestion";

/// Crate version reported by `/` and `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Pipeline, max_body_bytes: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_body_bytes,
        }
    }
}

// =============================================================================
// Health Check & Service Info
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: VERSION,
        service: SERVICE_NAME,
    })
}

/// Service descriptor returned by `/`.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub webhook: &'static str,
}

/// Root endpoint with service info.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: VERSION,
        health: "/health",
        webhook: super::WEBHOOK_PATH,
    })
}

// =============================================================================
// Telegram Webhook
// =============================================================================

/// Webhook response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
}

/// Error body, shaped `{"detail": "..."}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::Unauthorized => StatusCode::UNAUTHORIZED,
            WebhookError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            WebhookError::InvalidShape(_) => StatusCode::BAD_REQUEST,
            WebhookError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            WebhookError::UnreadableBody => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorResponse {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Classify a body read failure: the size cap, or anything else.
fn body_read_error(err: axum::Error) -> WebhookError {
    let mut cause: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(e) = cause {
        if e.is::<LengthLimitError>() {
            warn!("webhook_rejected_body_too_large");
            return WebhookError::PayloadTooLarge;
        }
        cause = e.source();
    }

    warn!(error = %err, "webhook_rejected_unreadable_body");
    WebhookError::UnreadableBody
}

/// Telegram webhook endpoint.
///
/// # Response
///
/// - 200 `{"status":"ok"}`: message normalized and dispatched
/// - 200 `{"status":"ignored"}`: update carried no channel post
/// - 400: body is not JSON, not a Telegram update, or could not be read
/// - 401: secret token header missing or wrong
/// - 413: body larger than the configured cap
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<WebhookResponse>, WebhookError> {
    let secret_token = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());

    // Authenticate before reading the body at all
    state.pipeline.authenticate(secret_token)?;

    let bytes = to_bytes(body, state.max_body_bytes)
        .await
        .map_err(body_read_error)?;

    let outcome = state.pipeline.ingest(&bytes).await?;

    Ok(Json(WebhookResponse {
        status: outcome.status(),
    }))
}
