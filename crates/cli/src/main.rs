use clap::{Parser, Subcommand};
use replybot::config::{self, Config};
use replybot::dispatch::{Dispatcher, OutboundAction};
use replybot::telegram::TelegramClient;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "replybot")]
#[command(about = "Telegram webhook bot with canned replies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Run the webhook server (default when no subcommand is given).
    Serve {
        /// Config file path (default: REPLYBOT_CONFIG_PATH or ~/.replybot/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Listen port (default from PORT env, config, or 8080)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Reply to TEXT in a chat exactly as the webhook would, without a server.
    Send {
        #[arg(long, short, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Target chat id.
        #[arg(long, allow_hyphen_values = true)]
        chat_id: i64,

        /// Command text (hi, image, audio, video, poll, button, or anything else).
        #[arg(long)]
        text: String,
    },

    /// Register or remove the bot's webhook with Telegram.
    Webhook {
        #[arg(long, short, value_name = "PATH", global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        action: WebhookAction,
    },
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Point Telegram at URL (the public address of this server's POST /).
    Set {
        #[arg(long)]
        url: String,
    },
    /// Remove the webhook.
    Delete,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Version) => {
            println!("replybot {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => run_serve(None, None).await,
        Some(Commands::Serve { config, port }) => run_serve(config, port).await,
        Some(Commands::Send {
            config,
            chat_id,
            text,
        }) => run_send(config, chat_id, &text).await,
        Some(Commands::Webhook { config, action }) => run_webhook(config, action).await,
    };
    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run_serve(config_path: Option<PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let config = config::load_config(config_path, port)?;
    log::info!(
        "starting webhook server on {}:{}",
        config.server.bind,
        config.server.port
    );
    replybot::server::run_server(config).await
}

fn build_client(config: &Config) -> anyhow::Result<TelegramClient> {
    let token = config::resolve_bot_token(config)?;
    Ok(TelegramClient::from_config(&config.telegram, token)?)
}

async fn run_send(config_path: Option<PathBuf>, chat_id: i64, text: &str) -> anyhow::Result<()> {
    let config = config::load_config(config_path, None)?;
    let dispatcher = Dispatcher::new(Arc::new(build_client(&config)?));
    let action = OutboundAction::for_command(text);
    dispatcher.perform(chat_id, &action).await?;
    println!("sent {} to chat {}", action, chat_id);
    Ok(())
}

async fn run_webhook(config_path: Option<PathBuf>, action: WebhookAction) -> anyhow::Result<()> {
    let config = config::load_config(config_path, None)?;
    let client = build_client(&config)?;
    match action {
        WebhookAction::Set { url } => {
            client.set_webhook(&url).await?;
            println!("webhook set to {}", url);
        }
        WebhookAction::Delete => {
            client.delete_webhook().await?;
            println!("webhook deleted");
        }
    }
    Ok(())
}
