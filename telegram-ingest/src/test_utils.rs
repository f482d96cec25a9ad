//! Shared test fixtures and instrumented handlers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::output::{HandlerError, HandlerRegistry, MessageHandler, StdoutHandler};
use crate::schema::NormalizedMessage;
use crate::Config;

pub const TEST_SECRET: &str = "abc123";
pub const TEST_TOKEN: &str = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

/// Config with the test secret plus any overrides.
pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("BOT_TOKEN".to_string(), TEST_TOKEN.to_string());
    vars.insert("TG_WEBHOOK_SECRET".to_string(), TEST_SECRET.to_string());
    for (k, v) in overrides {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

/// A channel post update as Telegram sends it.
pub fn channel_post_update() -> Value {
    json!({
        "update_id": 123456789,
        "channel_post": {
            "message_id": 42,
            "chat": {
                "id": -1001234567890i64,
                "title": "Test Channel",
                "type": "channel"
            },
            "date": 1735500000,
            "text": "Hello from the test!"
        }
    })
}

/// Registry with the stdout fallback plus `handler`.
pub fn registry_with(handler: Arc<dyn MessageHandler>) -> HandlerRegistry {
    HandlerRegistry::new(Arc::new(StdoutHandler)).with_handler(handler)
}

/// Records every message it receives.
#[derive(Default)]
pub struct RecordingHandler {
    received: Mutex<Vec<NormalizedMessage>>,
}

impl RecordingHandler {
    pub const NAME: &'static str = "recording";

    pub fn received(&self) -> Vec<NormalizedMessage> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageHandler for RecordingHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, message: &NormalizedMessage) -> Result<(), HandlerError> {
        self.received.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Always returns an error.
pub struct FailingHandler;

impl FailingHandler {
    pub const NAME: &'static str = "failing";
}

#[async_trait]
impl MessageHandler for FailingHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, _message: &NormalizedMessage) -> Result<(), HandlerError> {
        Err(anyhow::anyhow!("downstream unavailable").into())
    }
}

/// Always panics.
pub struct PanickingHandler;

impl PanickingHandler {
    pub const NAME: &'static str = "panicking";
}

#[async_trait]
impl MessageHandler for PanickingHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, _message: &NormalizedMessage) -> Result<(), HandlerError> {
        panic!("handler bug");
    }
}

/// Sleeps longer than any test timeout.
pub struct StalledHandler;

impl StalledHandler {
    pub const NAME: &'static str = "stalled";
}

#[async_trait]
impl MessageHandler for StalledHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn handle(&self, _message: &NormalizedMessage) -> Result<(), HandlerError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(())
    }
}
