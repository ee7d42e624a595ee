//! Inbound webhook envelope.

use serde::Deserialize;
use serde_json::Value;

/// Telegram chat identifier (negative for groups and channels).
pub type ChatId = i64;

/// Webhook POST body. Only the fields the dispatcher needs; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct InboundEnvelope {
    pub message: InboundMessage,
}

#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    pub chat: InboundChat,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct InboundChat {
    pub id: ChatId,
}

impl InboundEnvelope {
    /// Validate an untyped webhook body. The error names the first missing or mistyped field.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn chat_id(&self) -> ChatId {
        self.message.chat.id
    }

    pub fn text(&self) -> &str {
        &self.message.text
    }
}
