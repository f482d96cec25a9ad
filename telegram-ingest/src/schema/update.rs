//! Telegram update types.
//!
//! Only the fields the pipeline consumes are modelled. Everything else in the
//! payload travels untouched in the raw JSON value kept alongside the update.

use serde::Deserialize;

/// Telegram update envelope.
///
/// An update without a `channel_post` is valid; it simply is not relevant to
/// the ingestion pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawUpdate {
    /// Provider-assigned update identifier
    pub update_id: i64,
    /// Message posted to a channel, if this update carries one
    #[serde(default)]
    pub channel_post: Option<ChannelPost>,
}

/// A message posted to a broadcast channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelPost {
    /// Provider-assigned message id, unique within the chat
    pub message_id: i64,
    /// Chat the message was posted in
    pub chat: Chat,
    /// Unix epoch seconds
    pub date: i64,
    /// Body of a plain text message
    #[serde(default)]
    pub text: Option<String>,
    /// Body of a media message
    #[serde(default)]
    pub caption: Option<String>,
}

/// Telegram chat (minimal fields).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chat {
    /// Chat id; negative for channels and groups
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ChannelPost {
    /// Body of the post: `text` when non-empty, otherwise `caption` when
    /// non-empty, otherwise `None`.
    pub fn body(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.caption.as_deref().filter(|s| !s.is_empty()))
    }
}
