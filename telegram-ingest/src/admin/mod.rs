//! Webhook administration against the Telegram Bot API.
//!
//! Operator tooling only; the webhook server never calls Telegram.

pub mod client;
pub mod types;

pub use client::{BotApiClient, BotApiError, DEFAULT_API_BASE};
pub use types::{ApiResponse, WebhookInfo, ALLOWED_UPDATES};
