//! TOML configuration file loading
//!
//! Supports `~/.config/quick-translate-bot/config.toml` as a persistent config
//! source. All fields are optional. The file is a partial overlay on top of
//! defaults, and environment variables override it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct BotConfigFile {
    /// Telegram-side settings
    #[serde(default)]
    pub telegram: TelegramFileConfig,

    /// Translation endpoint settings
    #[serde(default)]
    pub translate: TranslateFileConfig,

    /// Server/runtime configuration
    #[serde(default)]
    pub server: ServerFileConfig,
}

/// Telegram configuration
#[derive(Debug, Default, Deserialize)]
pub struct TelegramFileConfig {
    pub bot_token: Option<String>,
    pub secret_token: Option<String>,
    pub bot_username: Option<String>,
    pub enable_group: Option<bool>,
    pub max_time_difference: Option<u64>,
    pub api_url: Option<String>,
}

/// Translation endpoint configuration
#[derive(Debug, Default, Deserialize)]
pub struct TranslateFileConfig {
    pub api_url: Option<String>,

    /// Target language for `/from` (e.g. "zh-CN")
    pub default_target: Option<String>,
}

/// Server/runtime configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// Webhook listener port
    pub port: Option<u16>,

    /// Include error details in 500 responses
    pub dev_mode: Option<bool>,

    /// Timeout for outbound HTTP calls, in seconds
    pub http_timeout_secs: Option<u64>,
}

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| {
        dirs.config_dir()
            .join("quick-translate-bot")
            .join("config.toml")
    })
}

/// Load the config file at `path`, or the default location when `None`
///
/// A missing file yields an empty overlay. An explicitly requested path must
/// exist.
///
/// # Errors
///
/// Returns error if an explicit path cannot be read, or if the file is not
/// valid TOML
pub fn load_config_file(path: Option<&Path>) -> Result<BotConfigFile> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => match default_config_path() {
            Some(p) => (p, false),
            None => return Ok(BotConfigFile::default()),
        },
    };

    if !explicit && !path.exists() {
        return Ok(BotConfigFile::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    let parsed: BotConfigFile = toml::from_str(&contents)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_partial_file() {
        let parsed: BotConfigFile = toml::from_str(
            r#"
            [telegram]
            bot_username = "quick_translate_bot"
            enable_group = true

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.telegram.bot_username.as_deref(),
            Some("quick_translate_bot")
        );
        assert_eq!(parsed.telegram.enable_group, Some(true));
        assert_eq!(parsed.server.port, Some(9000));
        assert!(parsed.translate.api_url.is_none());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let parsed: BotConfigFile = toml::from_str("").unwrap();
        assert!(parsed.telegram.bot_token.is_none());
        assert!(parsed.server.dev_mode.is_none());
    }

    #[test]
    fn explicit_path_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[translate]\ndefault_target = \"ja\"").unwrap();

        let parsed = load_config_file(Some(file.path())).unwrap();
        assert_eq!(parsed.translate.default_target.as_deref(), Some("ja"));
    }

    #[test]
    fn explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config_file(Some(&missing)).is_err());
    }

    #[test]
    fn invalid_toml_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();
        assert!(load_config_file(Some(file.path())).is_err());
    }
}
