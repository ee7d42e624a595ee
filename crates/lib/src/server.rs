//! Webhook HTTP server (single port).

use crate::config::{self, Config};
use crate::dispatch::{DispatchError, Dispatcher};
use crate::telegram::TelegramClient;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const GREETING: &str = "Welcome !";

/// Shared state for webhook handlers. Read-only for the process lifetime.
#[derive(Clone)]
pub struct ServerState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Routes: `GET /` greeting, `POST /` webhook.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/", get(greeting).post(webhook))
        .with_state(state)
}

/// Build the outbound client and dispatcher from config, then serve until SIGINT/SIGTERM.
/// Fails before binding when no bot token is configured.
pub async fn run_server(config: Config) -> Result<()> {
    let token = config::resolve_bot_token(&config)?;
    let client = TelegramClient::from_config(&config.telegram, token)
        .context("building telegram client")?;
    let state = ServerState {
        dispatcher: Arc::new(Dispatcher::new(Arc::new(client))),
    };

    let bind_addr = format!("{}:{}", config.server.bind.trim(), config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("webhook server listening on {}", bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server exited")?;
    log::info!("webhook server stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                log::warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// GET / returns a static greeting.
async fn greeting() -> &'static str {
    GREETING
}

/// POST / receives a Telegram update and answers it with one canned reply.
async fn webhook(State(state): State<ServerState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            log::debug!("webhook body is not JSON: {}", e);
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": "Invalid JSON" })));
        }
    };
    match state.dispatcher.route(&body).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "message": "ok" }))),
        Err(e @ DispatchError::MalformedInput(_)) => {
            log::debug!("{}", e);
            (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
        }
        Err(e @ DispatchError::Outbound(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}
