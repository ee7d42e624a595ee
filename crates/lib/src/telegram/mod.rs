//! Telegram Bot API: inbound webhook envelope, canned reply payloads, and the outbound client.
//!
//! The dispatcher talks to Telegram only through the [`Outbound`] trait so tests can swap in
//! a recording double; [`TelegramClient`] is the real implementation.

mod client;
mod outbound;
pub mod payload;
mod update;

pub use client::{TelegramClient, TelegramError};
pub use outbound::Outbound;
pub use update::{ChatId, InboundChat, InboundEnvelope, InboundMessage};
