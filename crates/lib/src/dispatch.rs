//! Command dispatch: webhook body -> chat id + text -> one canned reply.

use crate::telegram::{ChatId, InboundEnvelope, Outbound, TelegramError};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const GREETING_REPLY: &str = "Hello, world!";
pub const FALLBACK_REPLY: &str = "Are you okay ?";

/// Reply chosen for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundAction {
    Text(String),
    Photo,
    Audio,
    Video,
    Poll,
    Keyboard,
}

impl OutboundAction {
    /// Exact, case-sensitive match on the message text. Unknown text gets the fallback reply.
    pub fn for_command(text: &str) -> Self {
        match text {
            "hi" => OutboundAction::Text(GREETING_REPLY.to_string()),
            "image" => OutboundAction::Photo,
            "audio" => OutboundAction::Audio,
            "video" => OutboundAction::Video,
            "poll" => OutboundAction::Poll,
            "button" => OutboundAction::Keyboard,
            _ => OutboundAction::Text(FALLBACK_REPLY.to_string()),
        }
    }
}

impl fmt::Display for OutboundAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboundAction::Text(_) => f.write_str("text"),
            OutboundAction::Photo => f.write_str("photo"),
            OutboundAction::Audio => f.write_str("audio"),
            OutboundAction::Video => f.write_str("video"),
            OutboundAction::Poll => f.write_str("poll"),
            OutboundAction::Keyboard => f.write_str("keyboard"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("malformed webhook body: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Outbound(#[from] TelegramError),
}

/// Routes inbound webhook bodies to the outbound client.
pub struct Dispatcher {
    outbound: Arc<dyn Outbound>,
}

impl Dispatcher {
    pub fn new(outbound: Arc<dyn Outbound>) -> Self {
        Self { outbound }
    }

    /// Decode the body, pick the reply, send it once. Returns the action that was sent.
    pub async fn route(&self, body: &Value) -> Result<OutboundAction, DispatchError> {
        let envelope = InboundEnvelope::from_value(body)
            .map_err(|e| DispatchError::MalformedInput(e.to_string()))?;
        let chat_id = envelope.chat_id();
        let action = OutboundAction::for_command(envelope.text());
        log::debug!("chat {}: text {:?}", chat_id, envelope.text());
        log::info!("chat {}: sending {}", chat_id, action);
        self.perform(chat_id, &action).await?;
        Ok(action)
    }

    /// Send an already chosen action to `chat_id`.
    pub async fn perform(&self, chat_id: ChatId, action: &OutboundAction) -> Result<(), TelegramError> {
        let out = &self.outbound;
        let res = match action {
            OutboundAction::Text(text) => out.send_text(chat_id, text).await,
            OutboundAction::Photo => out.send_photo(chat_id).await,
            OutboundAction::Audio => out.send_audio(chat_id).await,
            OutboundAction::Video => out.send_video(chat_id).await,
            OutboundAction::Poll => out.send_poll(chat_id).await,
            OutboundAction::Keyboard => out.send_button(chat_id).await,
        };
        if let Err(ref e) = res {
            log::warn!("chat {}: sending {} failed: {}", chat_id, action, e);
        }
        res
    }
}
