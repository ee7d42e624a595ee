//! Telegram Bot API client: sendMessage, sendPhoto, sendAudio, sendVideo, sendPoll, and webhook
//! registration.

use super::outbound::Outbound;
use super::payload::{self, KeyboardMessage, Poll, TextMessage};
use super::ChatId;
use crate::config::TelegramConfig;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Transport(reqwest::Error),
    #[error("telegram {method} failed with status {status}")]
    Remote { method: &'static str, status: u16 },
}

impl From<reqwest::Error> for TelegramError {
    // The request URL embeds the bot token.
    fn from(e: reqwest::Error) -> Self {
        TelegramError::Transport(e.without_url())
    }
}

impl TelegramError {
    /// HTTP status returned by Telegram, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            TelegramError::Transport(e) => e.status().map(|s| s.as_u16()),
            TelegramError::Remote { status, .. } => Some(*status),
        }
    }
}

/// Request body shapes the Bot API accepts.
enum Body<'a, T: Serialize> {
    Json(&'a T),
    Form(&'a [(&'static str, String)]),
}

/// Bot API client. The token is fixed at construction and shared read-only.
#[derive(Clone)]
pub struct TelegramClient {
    api_base: String,
    token: String,
    client: reqwest::Client,
}

impl TelegramClient {
    /// Build a client for `token` against `api_base` with a per-request timeout.
    pub fn new(
        api_base: &str,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    pub fn from_config(config: &TelegramConfig, token: impl Into<String>) -> Result<Self, TelegramError> {
        Self::new(&config.api_base, token, config.request_timeout())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }

    async fn post<T: Serialize>(&self, method: &'static str, body: Body<'_, T>) -> Result<(), TelegramError> {
        let req = self.client.post(self.method_url(method));
        let req = match body {
            Body::Json(b) => req.json(b),
            Body::Form(f) => req.form(f),
        };
        let res = req.send().await?;
        let status = res.status();
        if status != reqwest::StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            log::debug!("telegram {} returned {}: {}", method, status, body);
            return Err(TelegramError::Remote {
                method,
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn post_form(&self, method: &'static str, form: &[(&'static str, String)]) -> Result<(), TelegramError> {
        self.post::<()>(method, Body::Form(form)).await
    }

    /// Set webhook URL. Telegram then POSTs updates to the URL instead of serving getUpdates.
    pub async fn set_webhook(&self, url: &str) -> Result<(), TelegramError> {
        let body = serde_json::json!({ "url": url });
        self.post("setWebhook", Body::Json(&body)).await
    }

    /// Remove the webhook so the bot can use getUpdates again.
    pub async fn delete_webhook(&self) -> Result<(), TelegramError> {
        let body = serde_json::json!({});
        self.post("deleteWebhook", Body::Json(&body)).await
    }
}

#[async_trait]
impl Outbound for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError> {
        self.post("sendMessage", Body::Json(&TextMessage { chat_id, text }))
            .await
    }

    async fn send_photo(&self, chat_id: ChatId) -> Result<(), TelegramError> {
        self.post_form("sendPhoto", &payload::photo_form(chat_id)).await
    }

    async fn send_audio(&self, chat_id: ChatId) -> Result<(), TelegramError> {
        self.post_form("sendAudio", &payload::audio_form(chat_id)).await
    }

    async fn send_video(&self, chat_id: ChatId) -> Result<(), TelegramError> {
        self.post_form("sendVideo", &payload::video_form(chat_id)).await
    }

    async fn send_poll(&self, chat_id: ChatId) -> Result<(), TelegramError> {
        self.post("sendPoll", Body::Json(&Poll::quiz(chat_id))).await
    }

    async fn send_button(&self, chat_id: ChatId) -> Result<(), TelegramError> {
        self.post("sendMessage", Body::Json(&KeyboardMessage::buttons(chat_id)))
            .await
    }
}
