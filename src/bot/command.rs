//! Private-chat command parsing

use std::sync::LazyLock;

use regex::Regex;

use crate::translate::{AUTO, LanguagePair, TranslationRequest};

static FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/from\s+([a-zA-Z-]+)\s+([\s\S]+)").expect("valid regex"));

static TO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/to\s+([a-zA-Z-]+)\s+([\s\S]+)").expect("valid regex"));

static TRANSLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/translate\s+([a-zA-Z-]+)\s+([a-zA-Z-]+)\s+([\s\S]+)").expect("valid regex")
});

/// A parsed private-chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start`
    Start,
    /// `/report`
    Report,
    /// `/from <lang> <text>`
    From { source: String, text: String },
    /// `/to <lang> <text>`
    To { target: String, text: String },
    /// `/translate <src> <tgt> <text>`
    Translate {
        source: String,
        target: String,
        text: String,
    },
    /// Anything else: translate with an inferred language pair
    Text(String),
}

impl Command {
    /// Parse message text; the first matching form wins
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "/start" => return Self::Start,
            "/report" => return Self::Report,
            _ => {}
        }

        if let Some(caps) = FROM.captures(text) {
            return Self::From {
                source: caps[1].to_string(),
                text: caps[2].to_string(),
            };
        }

        if let Some(caps) = TO.captures(text) {
            return Self::To {
                target: caps[1].to_string(),
                text: caps[2].to_string(),
            };
        }

        if let Some(caps) = TRANSLATE.captures(text) {
            return Self::Translate {
                source: caps[1].to_string(),
                target: caps[2].to_string(),
                text: caps[3].to_string(),
            };
        }

        Self::Text(text.to_string())
    }

    /// Translation this command asks for, if any
    ///
    /// `default_target` is the target used by `/from`.
    #[must_use]
    pub fn translation(self, default_target: &str) -> Option<TranslationRequest> {
        match self {
            Self::Start | Self::Report => None,
            Self::From { source, text } => Some(TranslationRequest::new(
                text,
                LanguagePair::new(source, default_target),
            )),
            Self::To { target, text } => {
                Some(TranslationRequest::new(text, LanguagePair::new(AUTO, target)))
            }
            Self::Translate {
                source,
                target,
                text,
            } => Some(TranslationRequest::new(text, LanguagePair::new(source, target))),
            Self::Text(text) => Some(TranslationRequest::inferred(text)),
        }
    }
}
