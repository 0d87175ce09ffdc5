//! Telegram Bot API types
//!
//! Inbound update shapes (webhook payloads) and outbound request bodies.

use serde::{Deserialize, Serialize};

/// Telegram Update object (simplified)
#[derive(Debug, Deserialize, Serialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<Message>,
    pub edited_message: Option<Message>,
}

impl Update {
    /// The new message, or the edited one when there is no new message
    #[must_use]
    pub const fn message(&self) -> Option<&Message> {
        match (&self.message, &self.edited_message) {
            (Some(m), _) | (None, Some(m)) => Some(m),
            (None, None) => None,
        }
    }
}

/// Telegram Message object (simplified)
#[derive(Debug, Deserialize, Serialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    /// Unix timestamp
    pub date: i64,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    /// Message this one quotes
    pub reply_to_message: Option<Box<ReplyMessage>>,
    pub sticker: Option<Sticker>,
    /// Photo (array of sizes)
    pub photo: Option<Vec<PhotoSize>>,
    pub document: Option<FileRef>,
    pub video: Option<FileRef>,
    pub audio: Option<FileRef>,
    pub voice: Option<FileRef>,
}

impl Message {
    /// Whether the message carries media the bot cannot translate
    #[must_use]
    pub const fn has_unsupported_media(&self) -> bool {
        self.photo.is_some()
            || self.document.is_some()
            || self.video.is_some()
            || self.audio.is_some()
            || self.voice.is_some()
    }

    /// Non-empty message text
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Quoted message; only its text matters here
#[derive(Debug, Deserialize, Serialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub message_id: i64,
    pub text: Option<String>,
}

/// Annotated span within message text
///
/// `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
}

/// Telegram Chat object
#[derive(Debug, Deserialize, Serialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
}

/// Chat kind as reported by Telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    Channel,
    #[serde(other)]
    Other,
}

impl ChatType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Group => "group",
            Self::Supergroup => "supergroup",
            Self::Channel => "channel",
            Self::Other => "unknown",
        }
    }
}

/// Telegram User object
#[derive(Debug, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

/// Sticker in a Telegram message
#[derive(Debug, Deserialize, Serialize)]
pub struct Sticker {
    pub file_id: String,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Telegram photo size
#[derive(Debug, Deserialize, Serialize)]
pub struct PhotoSize {
    pub file_id: String,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

/// Any file-backed attachment (document, video, audio, voice)
#[derive(Debug, Deserialize, Serialize)]
pub struct FileRef {
    pub file_id: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Telegram sendMessage request
#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    /// Sent as the string `"true"`
    pub disable_web_page_preview: &'static str,
}

/// Telegram sendSticker request
#[derive(Debug, Serialize)]
pub(crate) struct SendStickerRequest<'a> {
    pub chat_id: i64,
    pub sticker: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

/// Telegram setWebhook request
#[derive(Debug, Serialize)]
pub(crate) struct SetWebhookRequest<'a> {
    pub url: &'a str,
    pub secret_token: &'a str,
    pub allowed_updates: [&'static str; 2],
}

/// Generic Bot API response envelope
#[derive(Debug, Deserialize)]
pub(crate) struct TelegramResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}
