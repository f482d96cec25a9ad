//! Queue module for RabbitMQ operations.
//!
//! Used by the `queue` output handler to forward normalized messages:
//!
//! ```text
//! Webhook → Pipeline → QueueHandler → Publisher → <AMQP_QUEUE>
//! ```

pub mod publisher;

pub use publisher::Publisher;
