//! Telegram ingestion gateway.
//!
//! Receives Telegram webhook updates, normalizes channel posts, and hands each
//! one to a configurable output handler. Two binaries share this library:
//! - `tgingest`: the webhook server
//! - `tgingest-webhook`: registers, inspects and deletes the webhook at Telegram
//!
//! ## Architecture
//!
//! ```text
//! Telegram → POST /telegram/webhook → Pipeline → HandlerRegistry → stdout | noop | queue
//! ```

pub mod admin;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod queue;
pub mod schema;
pub mod secret;
pub mod web;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use config::{AdminConfig, Config, ConfigError, LogLevel};
pub use output::{HandlerError, HandlerRegistry, MessageHandler};
pub use pipeline::{Outcome, Pipeline, PipelineSettings, WebhookError};
pub use queue::Publisher;
pub use schema::{normalize, parse_update, NormalizedMessage, RawUpdate};
pub use web::{build_router, AppState};
