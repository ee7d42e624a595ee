//! Configuration types and loading.
//!
//! Config is loaded from an optional JSON file (e.g. `~/.replybot/config.json`) and then
//! overridden from the environment (`PORT`, `TOKEN_API`). A `.env` file in the working
//! directory is read first so its values take part in the override.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Webhook server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram Bot API settings.
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Webhook server bind address and port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Port for the webhook listener (default 8080). Overridden by PORT env.
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Bind address (default "0.0.0.0"; Telegram must be able to reach it).
    #[serde(default = "default_server_bind")]
    pub bind: String,
}

/// Telegram Bot API config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramConfig {
    /// Bot token from BotFather. Overridden by TOKEN_API env when set.
    pub bot_token: Option<String>,

    /// Bot API base URL (default "https://api.telegram.org").
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout for outbound calls, in seconds. 0 means the default.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

fn default_server_port() -> u16 {
    8080
}

fn default_server_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            bind: default_server_bind(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl TelegramConfig {
    /// Outbound request timeout. Zero falls back to the default.
    pub fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            log::warn!(
                "telegram.requestTimeoutSecs is 0, using {}s",
                default_request_timeout_secs()
            );
            return Duration::from_secs(default_request_timeout_secs());
        }
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Trimmed, non-empty value or None.
fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Resolve the bot token: env TOKEN_API overrides config. Errors when neither is set.
pub fn resolve_bot_token(config: &Config) -> Result<String> {
    pick_bot_token(std::env::var("TOKEN_API").ok(), config)
}

fn pick_bot_token(env_value: Option<String>, config: &Config) -> Result<String> {
    env_value
        .as_deref()
        .and_then(non_empty)
        .or_else(|| config.telegram.bot_token.as_deref().and_then(non_empty))
        .context("telegram bot token not configured (set TOKEN_API or telegram.botToken)")
}

/// Apply a PORT value over the configured port. An unparsable PORT is an error.
fn apply_port(config: &mut Config, env_value: Option<String>) -> Result<()> {
    if let Some(raw) = env_value.as_deref().and_then(non_empty) {
        config.server.port = raw
            .parse()
            .with_context(|| format!("parsing PORT value {:?}", raw))?;
    }
    Ok(())
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("REPLYBOT_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".replybot").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load `.env` (if present), then config from `path` (or the default path), then env PORT,
/// then `port_override` (e.g. a CLI flag). Missing file => default config.
pub fn load_config(path: Option<PathBuf>, port_override: Option<u16>) -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(p) => log::debug!("loaded environment from {}", p.display()),
        Err(e) if e.not_found() => log::debug!("no .env file found"),
        Err(e) => return Err(e).context("loading .env"),
    }
    let path = path.unwrap_or_else(default_config_path);
    build_config(&path, std::env::var("PORT").ok(), port_override)
}

fn build_config(path: &Path, port_env: Option<String>, port_override: Option<u16>) -> Result<Config> {
    let mut config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    apply_port(&mut config, port_env)?;
    if let Some(p) = port_override {
        config.server.port = p;
    }
    Ok(config)
}
