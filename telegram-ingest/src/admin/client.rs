//! Minimal Bot API client covering webhook management only.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::types::{
    ApiResponse, DeleteWebhookRequest, SetWebhookRequest, WebhookInfo, ALLOWED_UPDATES,
};

/// Default Bot API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Errors from Bot API calls.
#[derive(Debug, Error)]
pub enum BotApiError {
    /// Transport failure or undecodable response. The URL, which embeds
    /// the bot token, is stripped from `source`.
    #[error("request to {method} failed")]
    Http {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Telegram answered `ok: false`.
    #[error("{method} rejected ({code}): {description}")]
    Rejected {
        method: &'static str,
        code: i64,
        description: String,
    },

    /// Telegram answered `ok: true` without a result.
    #[error("{method} returned no result")]
    MissingResult { method: &'static str },
}

/// Client for the webhook endpoints of the Bot API.
#[derive(Clone)]
pub struct BotApiClient {
    http: Client,
    api_base: String,
    token: String,
}

impl BotApiClient {
    /// Create a client against the public Bot API.
    pub fn new(token: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Create a client against a custom API base (local Bot API server, tests).
    pub fn with_api_base(
        token: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    /// Register `url` as the webhook, subscribed to channel posts only.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: &str,
        drop_pending_updates: bool,
        max_connections: u32,
    ) -> Result<bool, BotApiError> {
        let request = SetWebhookRequest {
            url: url.to_string(),
            secret_token: secret_token.to_string(),
            allowed_updates: ALLOWED_UPDATES.iter().map(|s| s.to_string()).collect(),
            drop_pending_updates,
            max_connections,
        };
        self.call("setWebhook", Some(&request)).await
    }

    /// Current webhook registration.
    pub async fn webhook_info(&self) -> Result<WebhookInfo, BotApiError> {
        self.call::<(), _>("getWebhookInfo", None).await
    }

    /// Remove the webhook registration.
    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, BotApiError> {
        let request = DeleteWebhookRequest {
            drop_pending_updates,
        };
        self.call("deleteWebhook", Some(&request)).await
    }

    async fn call<B, T>(&self, method: &'static str, body: Option<&B>) -> Result<T, BotApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let http_err = |source: reqwest::Error| BotApiError::Http {
            method,
            source: source.without_url(),
        };

        let request = match body {
            Some(body) => self.http.post(self.method_url(method)).json(body),
            None => self.http.get(self.method_url(method)),
        };

        // Telegram reports failures in the body, often with a 4xx status
        let response = request.send().await.map_err(http_err)?;
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await.map_err(http_err)?;

        debug!(method, status = status.as_u16(), ok = envelope.ok, "bot_api_response");

        if !envelope.ok {
            return Err(BotApiError::Rejected {
                method,
                code: envelope.error_code.unwrap_or(i64::from(status.as_u16())),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        envelope
            .result
            .ok_or(BotApiError::MissingResult { method })
    }
}
