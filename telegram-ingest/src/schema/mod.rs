//! Schema layer: Telegram wire types, the normalized message format, and the
//! transformation between them.
//!
//! ## Processing Flow
//!
//! ```text
//! bytes → parse_payload() → Value → decode_update() → RawUpdate → normalize() → NormalizedMessage
//! ```

pub mod message;
pub mod update;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub use message::{normalize, NormalizedMessage, SOURCE_TELEGRAM};
pub use update::{ChannelPost, Chat, RawUpdate};

/// Errors raised while turning a request body into a [`RawUpdate`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not JSON at all.
    #[error("invalid JSON: {0}")]
    MalformedJson(serde_json::Error),

    /// The body is JSON but its root is not an object.
    #[error("update must be a JSON object")]
    NotAnObject,

    /// The body is a JSON object that does not match the update shape.
    #[error("invalid update format: {0}")]
    InvalidShape(serde_json::Error),
}

impl ParseError {
    /// Whether the failure happened before a JSON value could be produced.
    pub fn is_malformed_json(&self) -> bool {
        matches!(self, ParseError::MalformedJson(_))
    }
}

/// Decode a request body as JSON.
pub fn parse_payload(bytes: &[u8]) -> Result<Value, ParseError> {
    serde_json::from_slice(bytes).map_err(ParseError::MalformedJson)
}

/// Decode an already-parsed JSON value into a [`RawUpdate`].
///
/// The value is borrowed so the caller keeps it as the raw payload.
pub fn decode_update(payload: &Value) -> Result<RawUpdate, ParseError> {
    if !payload.is_object() {
        return Err(ParseError::NotAnObject);
    }
    RawUpdate::deserialize(payload).map_err(ParseError::InvalidShape)
}

/// Decode a request body straight into a [`RawUpdate`].
pub fn parse_update(bytes: &[u8]) -> Result<RawUpdate, ParseError> {
    let payload = parse_payload(bytes)?;
    decode_update(&payload)
}
