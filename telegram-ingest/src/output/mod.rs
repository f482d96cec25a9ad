//! Output handlers and the registry that selects between them.
//!
//! Every handler implements [`MessageHandler`]: accept one
//! [`NormalizedMessage`], perform a side effect, succeed or fail. The
//! registry is built once at startup and is read-only afterwards.

pub mod noop;
pub mod queue;
pub mod stdout;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::queue::Publisher;
use crate::schema::NormalizedMessage;

pub use noop::NoopHandler;
pub use queue::QueueHandler;
pub use stdout::StdoutHandler;

/// Names of the handlers registered by [`HandlerRegistry::standard`].
pub const HANDLER_NAMES: &[&str] = &[StdoutHandler::NAME, NoopHandler::NAME, QueueHandler::NAME];

/// Handler used when the configured name is not registered.
pub const DEFAULT_HANDLER: &str = StdoutHandler::NAME;

/// Failure of a single handler invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("handler failed: {0:#}")]
    Failed(anyhow::Error),

    /// The handler did not finish within the configured timeout.
    #[error("handler timed out after {0:?}")]
    TimedOut(Duration),

    /// The handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

// The cause is already rendered in the message, so it is not exposed as a
// `source` as well.
impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        HandlerError::Failed(err)
    }
}

/// A sink for normalized messages.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Name the handler is registered under.
    fn name(&self) -> &'static str;

    /// Consume one message.
    async fn handle(&self, message: &NormalizedMessage) -> Result<(), HandlerError>;
}

/// Name → handler lookup table with a fallback.
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<&'static str, Arc<dyn MessageHandler>>,
    fallback: Arc<dyn MessageHandler>,
}

impl HandlerRegistry {
    /// Create a registry whose only entry is `fallback`.
    pub fn new(fallback: Arc<dyn MessageHandler>) -> Self {
        let mut handlers: HashMap<&'static str, Arc<dyn MessageHandler>> = HashMap::new();
        handlers.insert(fallback.name(), fallback.clone());
        Self { handlers, fallback }
    }

    /// Register `handler` under its own name, replacing any previous entry.
    pub fn with_handler(mut self, handler: Arc<dyn MessageHandler>) -> Self {
        self.handlers.insert(handler.name(), handler);
        self
    }

    /// The production registry: `stdout` (fallback), `noop` and `queue`.
    pub fn standard(publisher: Publisher) -> Self {
        Self::new(Arc::new(StdoutHandler))
            .with_handler(Arc::new(NoopHandler))
            .with_handler(Arc::new(QueueHandler::new(publisher)))
    }

    /// Look up a handler by name, falling back to the default handler.
    pub fn resolve(&self, name: &str) -> Arc<dyn MessageHandler> {
        match self.handlers.get(name) {
            Some(handler) => handler.clone(),
            None => {
                debug!(
                    requested = %name,
                    fallback = self.fallback.name(),
                    "handler_fallback"
                );
                self.fallback.clone()
            }
        }
    }

    /// Registered handler names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
