//! Handler that logs a one-line summary of each message.

use async_trait::async_trait;
use chrono::DateTime;
use tracing::info;

use super::{HandlerError, MessageHandler};
use crate::schema::NormalizedMessage;

/// Maximum number of characters of message text included in the summary.
const PREVIEW_CHARS: usize = 100;

/// Placeholder logged for messages without text.
const NO_TEXT: &str = "(no text)";

/// Logs each message to the operator log stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutHandler;

impl StdoutHandler {
    pub const NAME: &'static str = "stdout";
}

#[async_trait]
impl MessageHandler for StdoutHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, message: &NormalizedMessage) -> Result<(), HandlerError> {
        info!(
            chat = %message.chat_display(),
            message_id = message.message_id,
            time = %render_timestamp(message.timestamp),
            text = %preview_text(message.text.as_deref()),
            "message_received"
        );
        Ok(())
    }
}

/// Render epoch seconds as RFC 3339 in UTC; out-of-range values are printed raw.
fn render_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp.to_string())
}

/// First [`PREVIEW_CHARS`] characters of the text, or the placeholder.
fn preview_text(text: Option<&str>) -> String {
    match text {
        Some(text) => text.chars().take(PREVIEW_CHARS).collect(),
        None => NO_TEXT.to_string(),
    }
}
