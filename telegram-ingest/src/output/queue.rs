//! Handler that forwards messages to RabbitMQ.

use async_trait::async_trait;

use super::{HandlerError, MessageHandler};
use crate::queue::Publisher;
use crate::schema::NormalizedMessage;

/// Publishes each message as JSON through a shared [`Publisher`].
#[derive(Clone)]
pub struct QueueHandler {
    publisher: Publisher,
}

impl QueueHandler {
    pub const NAME: &'static str = "queue";

    pub fn new(publisher: Publisher) -> Self {
        Self { publisher }
    }
}

#[async_trait]
impl MessageHandler for QueueHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, message: &NormalizedMessage) -> Result<(), HandlerError> {
        self.publisher.publish(message).await?;
        Ok(())
    }
}
