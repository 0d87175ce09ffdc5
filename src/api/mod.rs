//! HTTP server for the webhook endpoint

pub mod webhook;

use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::bot::{BotSettings, Dispatcher};
use crate::config::{Config, TelegramConfig};
use crate::telegram::{Messenger, TelegramClient};
use crate::translate::{GoogleTranslator, Translator};
use crate::Result;

/// Shared state for the webhook handler
#[derive(Clone)]
pub struct ApiState {
    /// Secret check settings
    pub telegram: TelegramConfig,
    pub dispatcher: Dispatcher,
    pub messenger: Arc<dyn Messenger>,
    /// Expose error messages in 500 responses
    pub dev_mode: bool,
}

impl ApiState {
    /// Wire the production translator and Telegram client from config
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = config.http_client()?;

        let translator: Arc<dyn Translator> = Arc::new(GoogleTranslator::new(
            http.clone(),
            config.translate.api_url.clone(),
        ));
        let messenger: Arc<dyn Messenger> = Arc::new(TelegramClient::new(
            config.telegram.bot_token.clone(),
            http,
            config.telegram.api_url.clone(),
        ));

        Ok(Self::new(config, translator, messenger))
    }

    /// Build state around arbitrary translator and messenger implementations
    #[must_use]
    pub fn new(
        config: &Config,
        translator: Arc<dyn Translator>,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            telegram: config.telegram.clone(),
            dispatcher: Dispatcher::new(BotSettings::from(config), translator),
            messenger,
            dev_mode: config.server.dev_mode,
        }
    }
}

/// Build the router; anything but `POST /bot/webhook` is a 404
#[must_use]
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/bot/webhook", post(webhook::handle_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    #[must_use]
    pub fn new(state: ApiState, port: u16) -> Self {
        Self {
            state: Arc::new(state),
            port,
        }
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Server(format!("failed to bind {addr}: {e}")))?;

        tracing::info!(
            port = self.port,
            group = self.state.dispatcher.settings().enable_group,
            "webhook server listening"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Server(format!("server error: {e}")))?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
