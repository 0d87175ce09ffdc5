//! Update dispatcher
//!
//! Turns one inbound update into at most one outbound [`Action`]. The
//! decision runs in a fixed order: staleness, chat type, media, command.

mod command;
pub mod reply;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use command::Command;

use crate::config::Config;
use crate::telegram::Messenger;
use crate::telegram::entities::{find_mention, text_after};
use crate::telegram::types::{ChatType, Message, ReplyMessage, Update};
use crate::translate::{TranslationRequest, Translator, translate_or_fallback};
use crate::{PROGRAM_NAME, Result, VERSION};

/// The single outbound effect of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a text reply
    SendText {
        chat_id: i64,
        text: String,
        reply_to: i64,
    },
    /// Send a sticker reply
    SendSticker {
        chat_id: i64,
        sticker: String,
        reply_to: i64,
    },
    /// Acknowledge without replying
    NoOp,
}

impl Action {
    fn text(message: &Message, text: impl Into<String>) -> Self {
        Self::SendText {
            chat_id: message.chat.id,
            text: text.into(),
            reply_to: message.message_id,
        }
    }

    /// Deliver the action through `messenger`
    ///
    /// # Errors
    ///
    /// Returns error if the messenger fails to deliver
    pub async fn execute(&self, messenger: &dyn Messenger) -> Result<()> {
        match self {
            Self::SendText {
                chat_id,
                text,
                reply_to,
            } => messenger.send_message(*chat_id, text, Some(*reply_to)).await,
            Self::SendSticker {
                chat_id,
                sticker,
                reply_to,
            } => {
                messenger
                    .send_sticker(*chat_id, sticker, Some(*reply_to))
                    .await
            }
            Self::NoOp => Ok(()),
        }
    }
}

/// Behavior knobs for the dispatcher
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Shown in `/start`, `/report` and the mention prompt
    pub program_name: String,
    pub version: String,
    /// Username matched against group mentions, without `@`
    pub bot_username: Option<String>,
    pub enable_group: bool,
    /// Maximum accepted `|now - date|`, in seconds
    pub max_time_difference: u64,
    /// Target language for `/from`
    pub default_target: String,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            program_name: PROGRAM_NAME.to_string(),
            version: VERSION.to_string(),
            bot_username: None,
            enable_group: false,
            max_time_difference: crate::config::DEFAULT_MAX_TIME_DIFFERENCE,
            default_target: crate::config::DEFAULT_TARGET_LANG.to_string(),
        }
    }
}

impl From<&Config> for BotSettings {
    fn from(config: &Config) -> Self {
        Self {
            bot_username: config.telegram.bot_username.clone(),
            enable_group: config.telegram.enable_group,
            max_time_difference: config.telegram.max_time_difference,
            default_target: config.translate.default_target.clone(),
            ..Self::default()
        }
    }
}

/// Decides what to do with each update
#[derive(Clone)]
pub struct Dispatcher {
    settings: BotSettings,
    translator: Arc<dyn Translator>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(settings: BotSettings, translator: Arc<dyn Translator>) -> Self {
        Self {
            settings,
            translator,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &BotSettings {
        &self.settings
    }

    /// Decide the action for `update` at the current time
    pub async fn dispatch(&self, update: &Update) -> Action {
        self.dispatch_at(update, Utc::now()).await
    }

    /// Decide the action for `update` as if received at `now`
    pub async fn dispatch_at(&self, update: &Update, now: DateTime<Utc>) -> Action {
        let Some(message) = update.message() else {
            tracing::debug!(update_id = update.update_id, "update without message, ignoring");
            return Action::NoOp;
        };

        let age = now.timestamp().abs_diff(message.date);
        if age > self.settings.max_time_difference {
            tracing::info!(
                message_id = message.message_id,
                age,
                max = self.settings.max_time_difference,
                "stale update, ignoring"
            );
            return Action::NoOp;
        }

        if message.chat.chat_type == ChatType::Private {
            self.private_message(message, now).await
        } else {
            self.group_message(message, now).await
        }
    }

    async fn group_message(&self, message: &Message, now: DateTime<Utc>) -> Action {
        if !self.settings.enable_group {
            return Action::NoOp;
        }
        let Some(username) = self.settings.bot_username.as_deref() else {
            return Action::NoOp;
        };
        let Some(text) = message.text() else {
            return Action::NoOp;
        };
        let Some(mention) = find_mention(text, &message.entities, username) else {
            tracing::debug!(chat_id = message.chat.id, "group message without bot mention");
            return Action::NoOp;
        };

        let command = text_after(text, mention);
        tracing::debug!(chat_id = message.chat.id, message_id = message.message_id, "bot mentioned");

        if command.is_empty() && message.reply_to_message.is_none() {
            return Action::text(message, reply::mention_prompt(&self.settings.program_name));
        }

        if command == "/report" {
            return Action::text(message, self.report(message, now));
        }

        self.group_translation(message, command, message.reply_to_message.as_deref())
            .await
    }

    /// Translate the text after a mention, or the quoted message when empty
    async fn group_translation(
        &self,
        message: &Message,
        text: &str,
        quoted: Option<&ReplyMessage>,
    ) -> Action {
        let text = text.trim();

        if text.is_empty()
            && let Some(quoted) = quoted
        {
            return match quoted.text.as_deref().filter(|t| !t.is_empty()) {
                Some(original) => {
                    Action::text(message, self.translate(TranslationRequest::inferred(original)).await)
                }
                None => Action::text(message, reply::QUOTED_NO_TEXT),
            };
        }

        Action::text(message, self.translate(TranslationRequest::inferred(text)).await)
    }

    async fn private_message(&self, message: &Message, now: DateTime<Utc>) -> Action {
        if let Some(sticker) = &message.sticker {
            return Action::SendSticker {
                chat_id: message.chat.id,
                sticker: sticker.file_id.clone(),
                reply_to: message.message_id,
            };
        }

        if message.has_unsupported_media() {
            return Action::text(message, reply::UNSUPPORTED_MEDIA);
        }

        let Some(text) = message.text() else {
            return Action::text(message, reply::NO_TEXT);
        };

        let command = Command::parse(text);
        match command {
            Command::Start => Action::text(
                message,
                reply::start(&self.settings.program_name, &self.settings.version),
            ),
            Command::Report => Action::text(message, self.report(message, now)),
            other => match other.translation(&self.settings.default_target) {
                Some(request) => Action::text(message, self.translate(request).await),
                None => Action::NoOp,
            },
        }
    }

    fn report(&self, message: &Message, now: DateTime<Utc>) -> String {
        reply::report(
            &self.settings.program_name,
            &self.settings.version,
            now,
            message,
        )
    }

    async fn translate(&self, request: TranslationRequest) -> String {
        tracing::debug!(
            from = %request.languages.source,
            to = %request.languages.target,
            "translating"
        );
        translate_or_fallback(self.translator.as_ref(), &request).await
    }
}
