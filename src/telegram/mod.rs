//! Telegram Bot API client
//!
//! Receives updates through the webhook in [`crate::api`]; this module sends
//! replies and manages the webhook registration.

pub mod entities;
pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use self::types::{
    SendMessageRequest, SendStickerRequest, SetWebhookRequest, TelegramResponse,
};
use crate::{Error, Result};

/// Outbound side of the bot: anything that can deliver replies to a chat
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send a text message, threaded under `reply_to` when given
    ///
    /// # Errors
    ///
    /// Returns error if the message could not be delivered
    async fn send_message(&self, chat_id: i64, text: &str, reply_to: Option<i64>) -> Result<()>;

    /// Send a sticker by file id, threaded under `reply_to` when given
    ///
    /// # Errors
    ///
    /// Returns error if the sticker could not be delivered
    async fn send_sticker(&self, chat_id: i64, sticker: &str, reply_to: Option<i64>)
    -> Result<()>;
}

/// Telegram Bot API client
#[derive(Clone)]
pub struct TelegramClient {
    token: SecretString,
    client: Client,
    api_url: String,
}

impl TelegramClient {
    /// Create a client against `api_url` (e.g. `https://api.telegram.org`)
    #[must_use]
    pub fn new(token: SecretString, client: Client, api_url: impl Into<String>) -> Self {
        Self {
            token,
            client,
            api_url: api_url.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.api_url, self.token.expose_secret())
    }

    /// POST a JSON body to a Bot API method and check the envelope
    async fn call<B: Serialize + Sync>(&self, method: &str, body: &B) -> Result<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram {method} error: {}", e.without_url())))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(Error::Channel(format!(
                "Telegram {method} error: {status} - {text}"
            )));
        }

        // Some proxies answer 200 with an error envelope
        if let Ok(parsed) = serde_json::from_str::<TelegramResponse>(&text)
            && !parsed.ok
        {
            return Err(Error::Channel(format!(
                "Telegram {method} error: {}",
                parsed.description.unwrap_or_default()
            )));
        }

        Ok(())
    }

    /// Register the webhook URL with the secret token Telegram should echo back
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn set_webhook(&self, url: &str, secret_token: &SecretString) -> Result<()> {
        let request = SetWebhookRequest {
            url,
            secret_token: secret_token.expose_secret(),
            allowed_updates: ["message", "edited_message"],
        };

        self.call("setWebhook", &request).await?;
        tracing::info!(url, "Telegram webhook set");
        Ok(())
    }

    /// Remove the webhook registration
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn delete_webhook(&self) -> Result<()> {
        self.call("deleteWebhook", &serde_json::json!({})).await?;
        tracing::info!("Telegram webhook deleted");
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(&self, chat_id: i64, text: &str, reply_to: Option<i64>) -> Result<()> {
        let request = SendMessageRequest {
            chat_id,
            text,
            reply_to_message_id: reply_to,
            disable_web_page_preview: "true",
        };

        self.call("sendMessage", &request).await?;
        tracing::debug!(chat_id, "Telegram message sent");
        Ok(())
    }

    async fn send_sticker(
        &self,
        chat_id: i64,
        sticker: &str,
        reply_to: Option<i64>,
    ) -> Result<()> {
        let request = SendStickerRequest {
            chat_id,
            sticker,
            reply_to_message_id: reply_to,
        };

        self.call("sendSticker", &request).await?;
        tracing::debug!(chat_id, "Telegram sticker sent");
        Ok(())
    }
}
