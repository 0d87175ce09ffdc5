//! Quick Translate Bot - Telegram webhook translator
//!
//! This library provides the pieces behind the webhook service:
//! - Update parsing and the per-message decision tree
//! - Command parsing (`/start`, `/report`, `/from`, `/to`, `/translate`)
//! - Language-direction inference and the translation endpoint client
//! - Telegram Bot API client for replies and webhook registration
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │        Telegram webhook (POST /bot/webhook)   │
//! └──────────────────────┬────────────────────────┘
//!                        │
//! ┌──────────────────────▼────────────────────────┐
//! │  api: secret check │ decode │ send │ status   │
//! └──────────────────────┬────────────────────────┘
//!                        │
//! ┌──────────────────────▼────────────────────────┐
//! │  bot: staleness │ chat type │ media │ command │
//! └───────────┬───────────────────────┬───────────┘
//!             │                       │
//! ┌───────────▼──────────┐ ┌──────────▼───────────┐
//! │ translate (gtx API)  │ │ telegram (Bot API)   │
//! └──────────────────────┘ └──────────────────────┘
//! ```

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod telegram;
pub mod translate;

/// Program name shown in `/start` and `/report`
pub const PROGRAM_NAME: &str = "Quick Translate Bot";

/// Program version shown in `/start` and `/report`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use api::{ApiServer, ApiState};
pub use bot::{Action, BotSettings, Command, Dispatcher};
pub use config::Config;
pub use error::{Error, Result};
pub use telegram::{Messenger, TelegramClient};
pub use translate::{GoogleTranslator, LanguagePair, TranslationRequest, Translator};
