//! Outbound seam: one method per canned reply.

use super::{ChatId, TelegramError};
use async_trait::async_trait;

/// Sends replies to a chat. Each call makes exactly one request and is never retried.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// sendMessage with caller-chosen text.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), TelegramError>;
    /// sendPhoto with the fixed sample image and caption.
    async fn send_photo(&self, chat_id: ChatId) -> Result<(), TelegramError>;
    async fn send_audio(&self, chat_id: ChatId) -> Result<(), TelegramError>;
    async fn send_video(&self, chat_id: ChatId) -> Result<(), TelegramError>;
    /// sendPoll with the fixed quiz.
    async fn send_poll(&self, chat_id: ChatId) -> Result<(), TelegramError>;
    /// sendMessage with the fixed reply keyboard.
    async fn send_button(&self, chat_id: ChatId) -> Result<(), TelegramError>;
}
