//! Translation resolver
//!
//! Picks the language pair for a piece of text, asks a [`Translator`] for the
//! result and turns any failure into a fixed user-facing message.

mod google;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

pub use google::{GoogleTranslator, parse_translation};

use crate::Result;

/// Reply used whenever the translation endpoint cannot produce a result
pub const FALLBACK_TEXT: &str = "抱歉，第三方翻译服务不可达，请稍后再试。";

/// Source code asking the endpoint to detect the language itself
pub const AUTO: &str = "auto";

static HAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\p{Han}").expect("valid regex"));

/// Source and target language codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Infer a Chinese/English direction from the text
    ///
    /// Any Han character means Chinese to English, otherwise English to
    /// Chinese.
    #[must_use]
    pub fn infer(text: &str) -> Self {
        if contains_han(text.trim()) {
            Self::new("zh-CN", "en")
        } else {
            Self::new("en", "zh-CN")
        }
    }
}

/// Whether `text` contains at least one Han-script character
#[must_use]
pub fn contains_han(text: &str) -> bool {
    HAN.is_match(text)
}

/// Text plus the language pair it should be translated with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub languages: LanguagePair,
}

impl TranslationRequest {
    /// Request with an explicit language pair
    #[must_use]
    pub fn new(text: impl Into<String>, languages: LanguagePair) -> Self {
        Self {
            text: text.into(),
            languages,
        }
    }

    /// Request whose language pair is inferred from the text
    #[must_use]
    pub fn inferred(text: impl Into<String>) -> Self {
        let text = text.into();
        let languages = LanguagePair::infer(&text);
        Self { text, languages }
    }
}

/// A translation backend
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request text
    ///
    /// # Errors
    ///
    /// Returns error if the backend is unreachable or answers with something
    /// that is not a translation
    async fn translate(&self, request: &TranslationRequest) -> Result<String>;
}

/// Translate, falling back to [`FALLBACK_TEXT`] on any failure
pub async fn translate_or_fallback(
    translator: &dyn Translator,
    request: &TranslationRequest,
) -> String {
    match translator.translate(request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                error = %e,
                from = %request.languages.source,
                to = %request.languages.target,
                "translation failed, replying with fallback"
            );
            FALLBACK_TEXT.to_string()
        }
    }
}
