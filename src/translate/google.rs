//! Google Translate `gtx` endpoint client

use async_trait::async_trait;
use reqwest::Client;

use super::{TranslationRequest, Translator};
use crate::{Error, Result};

/// Client for the keyless `translate_a/single` endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    api_url: String,
}

impl GoogleTranslator {
    #[must_use]
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }

    /// Full GET URL for a request
    #[must_use]
    pub fn request_url(&self, request: &TranslationRequest) -> String {
        format!(
            "{}?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.api_url,
            urlencoding::encode(&request.languages.source),
            urlencoding::encode(&request.languages.target),
            urlencoding::encode(&request.text),
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let response = self.client.get(self.request_url(request)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Translation(format!(
                "translation endpoint returned {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Translation(format!("invalid translation response: {e}")))?;

        let translated = parse_translation(&body)?;
        tracing::debug!(
            from = %request.languages.source,
            to = %request.languages.target,
            chars = translated.chars().count(),
            "translated"
        );
        Ok(translated)
    }
}

/// Join the translated segments of a `gtx` response
///
/// The payload is `[[["seg", "orig", ...], ...], ...]`; the result is the
/// first element of every entry in the first top-level array.
///
/// # Errors
///
/// Returns error if the payload does not have that shape
pub fn parse_translation(body: &serde_json::Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| Error::Translation("missing translation segments".to_string()))?;

    Ok(segments
        .iter()
        .filter_map(|entry| entry.get(0).and_then(serde_json::Value::as_str))
        .collect())
}

#[cfg(test)]
mod tests {
    use axum::extract::RawQuery;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use tokio::net::TcpListener;

    use super::*;
    use crate::translate::{FALLBACK_TEXT, LanguagePair, translate_or_fallback};

    async fn spawn(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/translate_a/single")
    }

    #[test]
    fn joins_segments_in_order() {
        let body = serde_json::json!([
            [
                ["Hello, ", "你好，", null, null, 10],
                ["world.", "世界。", null, null, 10]
            ],
            null,
            "zh-CN"
        ]);
        assert_eq!(parse_translation(&body).unwrap(), "Hello, world.");
    }

    #[test]
    fn skips_non_string_segments() {
        let body = serde_json::json!([[["a", "x"], [null, null, "pinyin"], ["b", "y"]]]);
        assert_eq!(parse_translation(&body).unwrap(), "ab");
    }

    #[test]
    fn rejects_unexpected_shape() {
        assert!(parse_translation(&serde_json::json!({"error": "nope"})).is_err());
        assert!(parse_translation(&serde_json::json!([])).is_err());
        assert!(parse_translation(&serde_json::json!([null])).is_err());
    }

    #[test]
    fn url_encodes_text() {
        let translator = GoogleTranslator::new(Client::new(), "https://translate.example/single");
        let request = TranslationRequest::new("a b&c=你", LanguagePair::new("auto", "zh-CN"));

        assert_eq!(
            translator.request_url(&request),
            "https://translate.example/single?client=gtx&sl=auto&tl=zh-CN&dt=t&q=a%20b%26c%3D%E4%BD%A0"
        );
    }

    #[tokio::test]
    async fn translates_against_endpoint() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|RawQuery(query): RawQuery| async move {
                let query = query.unwrap_or_default();
                assert!(query.contains("client=gtx"));
                assert!(query.contains("sl=fr"));
                assert!(query.contains("tl=ja"));
                assert!(query.contains("dt=t"));
                assert!(query.contains("q=Bonjour"));
                axum::Json(serde_json::json!([[["こんにちは", "Bonjour"]]]))
            }),
        );
        let url = spawn(app).await;

        let translator = GoogleTranslator::new(Client::new(), url);
        let request = TranslationRequest::new("Bonjour", LanguagePair::new("fr", "ja"));
        assert_eq!(translator.translate(&request).await.unwrap(), "こんにちは");
    }

    #[tokio::test]
    async fn server_error_yields_fallback() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE.into_response() }),
        );
        let url = spawn(app).await;

        let translator = GoogleTranslator::new(Client::new(), url);
        let request = TranslationRequest::inferred("hello");
        assert!(translator.translate(&request).await.is_err());
        assert_eq!(translate_or_fallback(&translator, &request).await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn malformed_json_yields_fallback() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|| async { "<html>captcha</html>" }),
        );
        let url = spawn(app).await;

        let translator = GoogleTranslator::new(Client::new(), url);
        let request = TranslationRequest::inferred("hello");
        assert_eq!(translate_or_fallback(&translator, &request).await, FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn timeout_yields_fallback() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                "[]"
            }),
        );
        let url = spawn(app).await;

        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(100))
            .build()
            .unwrap();
        let translator = GoogleTranslator::new(client, url);
        let request = TranslationRequest::inferred("hello");
        assert_eq!(translate_or_fallback(&translator, &request).await, FALLBACK_TEXT);
    }
}
