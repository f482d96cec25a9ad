//! Normalized message format handed to output handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::update::RawUpdate;

/// Source tag for messages ingested from Telegram.
pub const SOURCE_TELEGRAM: &str = "telegram";

/// Internal message format, decoupled from the Telegram wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Provider tag, always [`SOURCE_TELEGRAM`] for now
    pub source: String,
    /// Chat id rendered as text so consumers never truncate it
    pub chat_id: String,
    pub chat_title: Option<String>,
    pub message_id: i64,
    /// Unix epoch seconds
    pub timestamp: i64,
    /// `text` for plain messages, `caption` for media messages
    pub text: Option<String>,
    /// The full update payload exactly as received
    pub raw: Value,
}

/// Transform a Telegram update into the normalized format.
///
/// Returns `None` if the update doesn't carry a `channel_post`.
pub fn normalize(update: RawUpdate, raw_payload: Value) -> Option<NormalizedMessage> {
    let post = update.channel_post?;
    let text = post.body().map(str::to_string);

    Some(NormalizedMessage {
        source: SOURCE_TELEGRAM.to_string(),
        chat_id: post.chat.id.to_string(),
        chat_title: post.chat.title,
        message_id: post.message_id,
        timestamp: post.date,
        text,
        raw: raw_payload,
    })
}

impl NormalizedMessage {
    /// Chat title when present, chat id otherwise.
    pub fn chat_display(&self) -> &str {
        self.chat_title.as_deref().unwrap_or(&self.chat_id)
    }
}
