//! Minimal Telegram Bot API client: long polling and message sending.
//!
//! Only the handful of methods the bot needs. Every call goes through
//! the standard `{ok, result, description}` envelope.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the Bot API transport.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

/// One incoming update from `getUpdates`.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// An incoming chat message. Non-text messages carry `text: None`.
#[derive(Debug, Deserialize)]
pub struct Message {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// The bot's own identity from `getMe`.
#[derive(Debug, Deserialize)]
pub struct BotProfile {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesRequest {
    offset: i64,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'a str,
}

/// Bot API client bound to one token.
pub struct BotApi {
    client: Client,
    /// `{api_base}/bot{token}` - contains the secret, never log it.
    base: String,
}

impl BotApi {
    pub fn new(api_base: &str, token: &str, request_timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| BotError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base: format!("{}/bot{}", api_base.trim_end_matches('/'), token),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &impl Serialize,
    ) -> Result<T, BotError> {
        let url = format!("{}/{}", self.base, method);
        let resp = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| BotError::Connection(e.to_string()))?;

        let envelope: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        if !envelope.ok {
            return Err(BotError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| BotError::Parse("missing result".to_string()))
    }

    /// Verify the token and fetch the bot's identity.
    pub async fn get_me(&self) -> Result<BotProfile, BotError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for message updates starting at `offset`.
    pub async fn get_updates(&self, offset: i64, timeout: u64) -> Result<Vec<Update>, BotError> {
        self.call(
            "getUpdates",
            &GetUpdatesRequest {
                offset,
                timeout,
                allowed_updates: ["message"],
            },
        )
        .await
    }

    /// Send a Markdown-formatted message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &SendMessageRequest {
                    chat_id,
                    text,
                    parse_mode: "Markdown",
                },
            )
            .await?;
        Ok(())
    }
}
