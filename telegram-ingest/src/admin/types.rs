//! Bot API request and response types for webhook management.
//!
//! Reference: https://core.telegram.org/bots/api#getting-updates

use serde::{Deserialize, Serialize};

/// Update types the service subscribes to.
pub const ALLOWED_UPDATES: &[&str] = &["channel_post"];

/// Envelope wrapping every Bot API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

/// Body of `setWebhook`.
#[derive(Debug, Clone, Serialize)]
pub struct SetWebhookRequest {
    pub url: String,
    pub secret_token: String,
    pub allowed_updates: Vec<String>,
    pub drop_pending_updates: bool,
    pub max_connections: u32,
}

/// Body of `deleteWebhook`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteWebhookRequest {
    pub drop_pending_updates: bool,
}

/// Result of `getWebhookInfo`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookInfo {
    /// Empty when no webhook is registered
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub has_custom_certificate: bool,
    #[serde(default)]
    pub pending_update_count: u64,
    #[serde(default)]
    pub last_error_date: Option<i64>,
    #[serde(default)]
    pub last_error_message: Option<String>,
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default)]
    pub allowed_updates: Option<Vec<String>>,
}
