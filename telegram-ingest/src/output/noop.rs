//! Handler that discards messages. Used for tests and disabled output.

use async_trait::async_trait;

use super::{HandlerError, MessageHandler};
use crate::schema::NormalizedMessage;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHandler;

impl NoopHandler {
    pub const NAME: &'static str = "noop";
}

#[async_trait]
impl MessageHandler for NoopHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, _message: &NormalizedMessage) -> Result<(), HandlerError> {
        Ok(())
    }
}
