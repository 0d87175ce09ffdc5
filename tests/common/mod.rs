//! Shared test utilities

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use quick_translate_bot::config::file::BotConfigFile;
use quick_translate_bot::{ApiState, Config, Error, Messenger, TranslationRequest, Translator};
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

/// A reply the mock messenger was asked to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        reply_to: Option<i64>,
    },
    Sticker {
        chat_id: i64,
        sticker: String,
        reply_to: Option<i64>,
    },
}

/// Mock messenger for testing
#[derive(Default)]
pub struct MockMessenger {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> quick_translate_bot::Result<()> {
        self.sent.lock().await.push(Sent::Text {
            chat_id,
            text: text.to_string(),
            reply_to,
        });
        if self.fail {
            return Err(Error::Channel("Telegram sendMessage error: 400".to_string()));
        }
        Ok(())
    }

    async fn send_sticker(
        &self,
        chat_id: i64,
        sticker: &str,
        reply_to: Option<i64>,
    ) -> quick_translate_bot::Result<()> {
        self.sent.lock().await.push(Sent::Sticker {
            chat_id,
            sticker: sticker.to_string(),
            reply_to,
        });
        if self.fail {
            return Err(Error::Channel("Telegram sendSticker error: 400".to_string()));
        }
        Ok(())
    }
}

/// Mock translator that records requests and tags the text
#[derive(Default)]
pub struct MockTranslator {
    pub requests: Mutex<Vec<TranslationRequest>>,
    pub fail: bool,
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, request: &TranslationRequest) -> quick_translate_bot::Result<String> {
        self.requests.lock().await.push(request.clone());
        if self.fail {
            return Err(Error::Translation("endpoint returned 503".to_string()));
        }
        Ok(format!(
            "{}->{}: {}",
            request.languages.source, request.languages.target, request.text
        ))
    }
}

/// Config with test secrets and the given extra env values
pub fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut pairs = vec![("TELEGRAM_BOT_TOKEN", "123:abc"), ("SECRET_TOKEN", SECRET)];
    pairs.extend_from_slice(extra);
    Config::resolve(BotConfigFile::default(), |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .expect("valid test config")
}

/// Test harness: router plus handles on the mocks
pub struct Harness {
    pub app: axum::Router,
    pub messenger: Arc<MockMessenger>,
    pub translator: Arc<MockTranslator>,
}

impl Harness {
    pub fn new(config: &Config) -> Self {
        Self::with_mocks(config, MockMessenger::default(), MockTranslator::default())
    }

    pub fn with_mocks(config: &Config, messenger: MockMessenger, translator: MockTranslator) -> Self {
        let messenger = Arc::new(messenger);
        let translator = Arc::new(translator);
        let state = ApiState::new(config, translator.clone(), messenger.clone());

        Self {
            app: quick_translate_bot::api::router(Arc::new(state)),
            messenger,
            translator,
        }
    }

    /// POST a JSON body to the webhook with the given secret header
    pub async fn post(&self, secret: Option<&str>, body: &str) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/bot/webhook")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header("X-Telegram-Bot-Api-Secret-Token", secret);
        }

        self.app
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap()
    }

    /// POST an update with the correct secret and return the status
    pub async fn deliver(&self, update: &serde_json::Value) -> StatusCode {
        self.post(Some(SECRET), &update.to_string()).await.status()
    }

    pub async fn sent(&self) -> Vec<Sent> {
        self.messenger.sent.lock().await.clone()
    }

    pub async fn requests(&self) -> Vec<TranslationRequest> {
        self.translator.requests.lock().await.clone()
    }
}

/// Current unix time
pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Private-chat text update dated now
pub fn private_text(text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 1,
        "message": {
            "message_id": 100,
            "date": now(),
            "chat": {"id": 42, "type": "private", "first_name": "Alice"},
            "from": {"id": 42, "is_bot": false, "first_name": "Alice", "username": "alice"},
            "text": text
        }
    })
}

/// Group update mentioning `@quick_bot` at offset 0
pub fn group_mention(text: &str) -> serde_json::Value {
    serde_json::json!({
        "update_id": 2,
        "message": {
            "message_id": 200,
            "date": now(),
            "chat": {"id": -1001, "type": "supergroup", "title": "Team"},
            "from": {"id": 7, "is_bot": false, "first_name": "Bob", "username": "bob"},
            "text": text,
            "entities": [{"type": "mention", "offset": 0, "length": 10}]
        }
    })
}

/// Env values enabling group handling for `@quick_bot`
pub const GROUP_ENV: &[(&str, &str)] = &[
    ("ENABLE_GROUP_FEATURE", "true"),
    ("TELEGRAM_BOT_NAME", "quick_bot"),
];
