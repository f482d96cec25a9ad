//! Webhook ingestion pipeline.
//!
//! Every request runs the same steps, in order, with no retries:
//!
//! ```text
//! authenticate → parse JSON → validate update → normalize → dispatch → respond
//! ```
//!
//! The first four steps may end the request early. Dispatch never does: a
//! handler that fails, panics or stalls is logged and the request still
//! succeeds, because Telegram re-delivers on any non-2xx response and a
//! re-delivery cannot fix a broken handler.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::FutureExt;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::output::{HandlerError, HandlerRegistry, MessageHandler};
use crate::schema::{decode_update, normalize, parse_payload, NormalizedMessage, ParseError};
use crate::secret::verify_secret_token;

/// Requests the pipeline rejects.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Secret token header missing or wrong.
    #[error("Invalid secret token")]
    Unauthorized,

    /// Body is not JSON.
    #[error("Invalid JSON")]
    MalformedBody(#[source] ParseError),

    /// Body is JSON but not a Telegram update.
    #[error("Invalid update format")]
    InvalidShape(#[source] ParseError),

    /// Body exceeds the configured size cap. Raised by the HTTP layer.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Body could not be read, e.g. the client went away mid-request.
    /// Raised by the HTTP layer.
    #[error("Could not read request body")]
    UnreadableBody,
}

impl From<ParseError> for WebhookError {
    fn from(err: ParseError) -> Self {
        if err.is_malformed_json() {
            WebhookError::MalformedBody(err)
        } else {
            WebhookError::InvalidShape(err)
        }
    }
}

/// Successful end states of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A message was normalized and dispatched.
    Processed,
    /// The update carried no channel post.
    Ignored,
}

impl Outcome {
    /// Value of the `status` field in the response body.
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Processed => "ok",
            Outcome::Ignored => "ignored",
        }
    }
}

/// The part of the configuration the pipeline reads.
#[derive(Clone)]
pub struct PipelineSettings {
    pub secret: String,
    pub handler_name: String,
    pub handler_timeout: Duration,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            secret: config.webhook_secret.clone(),
            handler_name: config.output_handler.clone(),
            handler_timeout: config.handler_timeout(),
        }
    }
}

/// Stateless request processor shared by all requests.
#[derive(Clone)]
pub struct Pipeline {
    settings: PipelineSettings,
    registry: HandlerRegistry,
}

impl Pipeline {
    pub fn new(settings: PipelineSettings, registry: HandlerRegistry) -> Self {
        Self { settings, registry }
    }

    /// Run the whole pipeline for one webhook request.
    pub async fn process(
        &self,
        secret_token: Option<&str>,
        body: &[u8],
    ) -> Result<Outcome, WebhookError> {
        self.authenticate(secret_token)?;
        self.ingest(body).await
    }

    /// Compare the provided secret token with the configured one.
    pub fn authenticate(&self, secret_token: Option<&str>) -> Result<(), WebhookError> {
        if verify_secret_token(&self.settings.secret, secret_token) {
            Ok(())
        } else {
            warn!("webhook_rejected_invalid_secret");
            Err(WebhookError::Unauthorized)
        }
    }

    /// Parse, normalize and dispatch an authenticated request body.
    pub async fn ingest(&self, body: &[u8]) -> Result<Outcome, WebhookError> {
        let payload = parse_payload(body).map_err(|e| {
            warn!(error = %e, body_length = body.len(), "webhook_rejected_invalid_json");
            WebhookError::from(e)
        })?;

        let update = decode_update(&payload).map_err(|e| {
            warn!(error = %e, "webhook_rejected_invalid_update");
            WebhookError::from(e)
        })?;

        let update_id = update.update_id;
        debug!(update_id = update_id, "webhook_update_received");

        let message = match normalize(update, payload) {
            Some(message) => message,
            None => {
                debug!(update_id = update_id, "webhook_update_ignored");
                return Ok(Outcome::Ignored);
            }
        };

        let handler = self.registry.resolve(&self.settings.handler_name);

        match dispatch(handler.as_ref(), &message, self.settings.handler_timeout).await {
            Ok(()) => {
                debug!(
                    update_id = update_id,
                    handler = handler.name(),
                    "webhook_message_dispatched"
                );
            }
            Err(e) => {
                error!(
                    update_id = update_id,
                    handler = handler.name(),
                    chat_id = %message.chat_id,
                    message_id = message.message_id,
                    error = %e,
                    "handler_error"
                );
            }
        }

        Ok(Outcome::Processed)
    }
}

/// Invoke `handler`, turning errors, panics and timeouts into `HandlerError`.
async fn dispatch(
    handler: &dyn MessageHandler,
    message: &NormalizedMessage,
    timeout: Duration,
) -> Result<(), HandlerError> {
    let call = AssertUnwindSafe(handler.handle(message)).catch_unwind();

    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(result)) => result,
        Ok(Err(panic)) => Err(HandlerError::Panicked(panic_message(panic.as_ref()))),
        Err(_) => Err(HandlerError::TimedOut(timeout)),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
