//! replybot core library: configuration, Telegram Bot API client, command dispatch,
//! and the webhook server used by the CLI.

pub mod config;
pub mod dispatch;
pub mod server;
pub mod telegram;
