//! Webhook secret token verification.
//!
//! Telegram echoes the `secret_token` given to `setWebhook` in the
//! `X-Telegram-Bot-Api-Secret-Token` header of every webhook request.
//! Reference: https://core.telegram.org/bots/api#setwebhook

use sha2::{Digest, Sha256};
use tracing::warn;

/// Header Telegram uses to carry the webhook secret.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

/// Check the secret token sent with a webhook request.
///
/// Returns `true` only when `provided` is present and exactly equal to
/// `expected`. Both values are hashed before comparing so the comparison time
/// depends on neither their content nor their length.
pub fn verify_secret_token(expected: &str, provided: Option<&str>) -> bool {
    let provided = match provided {
        Some(p) => p,
        None => {
            warn!("webhook_secret_missing");
            return false;
        }
    };

    if expected.is_empty() {
        warn!("webhook_secret_not_configured");
        return false;
    }

    let valid = constant_time_compare(&digest(expected), &digest(provided));

    if !valid {
        warn!(provided_length = provided.len(), "webhook_secret_mismatch");
    }

    valid
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
