//! Configuration management for Quick Translate Bot

pub mod file;

use std::path::Path;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use self::file::BotConfigFile;
use crate::{Error, Result};

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default translation endpoint
pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Default staleness threshold in seconds
pub const DEFAULT_MAX_TIME_DIFFERENCE: u64 = 20;

/// Default target language for `/from`
pub const DEFAULT_TARGET_LANG: &str = "zh-CN";

const DEFAULT_PORT: u16 = 8787;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Translation endpoint configuration
    pub translate: TranslateConfig,

    /// HTTP server configuration
    pub server: ServerConfig,
}

/// Telegram configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token, used in outbound API URLs
    pub bot_token: SecretString,

    /// Expected `X-Telegram-Bot-Api-Secret-Token` header value
    pub secret_token: SecretString,

    /// Bot username without the leading `@`, matched against mentions
    pub bot_username: Option<String>,

    /// Whether group mentions are handled at all
    pub enable_group: bool,

    /// Updates older (or newer) than this many seconds are ignored
    pub max_time_difference: u64,

    /// Bot API base URL
    pub api_url: String,
}

/// Translation endpoint configuration
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    /// Translation endpoint URL (query string is appended)
    pub api_url: String,

    /// Target language for `/from`
    pub default_target: String,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Expose error messages in 500 responses
    pub dev_mode: bool,

    /// Timeout applied to every outbound HTTP call
    pub http_timeout: Duration,
}

impl Config {
    /// Load configuration from the environment and an optional TOML file
    ///
    /// Precedence is env > toml > default.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is unreadable or a required value
    /// (bot token, secret token) is missing
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let fc = file::load_config_file(config_path)?;
        Self::resolve(fc, |key| std::env::var(key).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns error if a required value is missing or a value fails to parse
    pub fn resolve(fc: BotConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = non_empty(env("TELEGRAM_BOT_TOKEN").or(fc.telegram.bot_token))
            .ok_or_else(|| Error::Config("TELEGRAM_BOT_TOKEN is not set".to_string()))?;

        let secret_token = non_empty(env("SECRET_TOKEN").or(fc.telegram.secret_token))
            .ok_or_else(|| Error::Config("SECRET_TOKEN is not set".to_string()))?;

        let bot_username = non_empty(env("TELEGRAM_BOT_NAME").or(fc.telegram.bot_username))
            .map(|name| name.trim_start_matches('@').to_string());

        let enable_group = env("ENABLE_GROUP_FEATURE")
            .map(|v| parse_bool(&v))
            .or(fc.telegram.enable_group)
            .unwrap_or(false);

        let max_time_difference = match env("MAX_TIME_DIFFERENCE") {
            Some(v) => parse_number("MAX_TIME_DIFFERENCE", &v)?,
            None => fc
                .telegram
                .max_time_difference
                .unwrap_or(DEFAULT_MAX_TIME_DIFFERENCE),
        };

        let telegram_api_url = env("TELEGRAM_API_URL")
            .or(fc.telegram.api_url)
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());

        let translate_api_url = env("TRANSLATE_API_URL")
            .or(fc.translate.api_url)
            .unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string());

        let default_target = non_empty(env("DEFAULT_TARGET_LANG").or(fc.translate.default_target))
            .unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string());

        let port = match env("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => fc.server.port.unwrap_or(DEFAULT_PORT),
        };

        let dev_mode = env("DEV_MODE")
            .map(|v| parse_bool(&v))
            .or(fc.server.dev_mode)
            .unwrap_or(false);

        let http_timeout_secs = match env("HTTP_TIMEOUT_SECS") {
            Some(v) => parse_number("HTTP_TIMEOUT_SECS", &v)?,
            None => fc
                .server
                .http_timeout_secs
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            telegram: TelegramConfig {
                bot_token: SecretString::from(bot_token),
                secret_token: SecretString::from(secret_token),
                bot_username,
                enable_group,
                max_time_difference,
                api_url: telegram_api_url.trim_end_matches('/').to_string(),
            },
            translate: TranslateConfig {
                api_url: translate_api_url,
                default_target,
            },
            server: ServerConfig {
                port,
                dev_mode,
                http_timeout: Duration::from_secs(http_timeout_secs),
            },
        })
    }

    /// Build a shared HTTP client honoring the configured timeout
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.server.http_timeout)
            .build()
            .map_err(Error::from)
    }
}

impl TelegramConfig {
    /// Whether the provided header value matches the configured secret
    #[must_use]
    pub fn verify_secret(&self, provided: Option<&str>) -> bool {
        provided.is_some_and(|p| {
            constant_time_eq(self.secret_token.expose_secret().as_bytes(), p.as_bytes())
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> bool {
    value == "true" || value == "1"
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a number, got {value:?}")))
}

/// Constant-time byte comparison to prevent timing attacks
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
