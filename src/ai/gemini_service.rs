use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::{DuesError, DuesResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that turns a prompt into text.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> DuesResult<String>;
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> DuesResult<String> {
        let api_key = self.api_key.as_deref().ok_or(DuesError::MissingCredential)?;

        let request_body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "temperature": 0.7
            }
        });

        debug!(model = %self.model, prompt_chars = prompt.len(), "sending generateContent request");

        let response = ureq::post(&self.endpoint())
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", api_key)
            .timeout(REQUEST_TIMEOUT)
            .send_json(request_body)
            .map_err(|e| match e {
                ureq::Error::Status(code, resp) => {
                    let body = resp.into_string().unwrap_or_default();
                    let snippet: String = body.chars().take(200).collect();
                    DuesError::Service(format!("HTTP {}: {}", code, snippet))
                }
                ureq::Error::Transport(t) => DuesError::Service(format!("transport error: {}", t)),
            })?;

        let json: Value = response
            .into_json()
            .map_err(|e| DuesError::Service(format!("unreadable response: {}", e)))?;

        extract_text(&json)
    }
}

/// Concatenates the text parts of the first candidate.
pub fn extract_text(json: &Value) -> DuesResult<String> {
    let parts = json
        .pointer("/candidates/0/content/parts")
        .and_then(|v| v.as_array())
        .ok_or_else(|| DuesError::Service("no candidates in response".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        return Err(DuesError::Service("empty response".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_before_any_request() {
        // Unroutable base url: reaching the network would produce a transport error instead.
        let client = GeminiClient::new(None, DEFAULT_MODEL, "http://127.0.0.1:9");
        assert!(matches!(
            client.generate("hello"),
            Err(DuesError::MissingCredential)
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = GeminiClient::new(Some("  ".into()), DEFAULT_MODEL, DEFAULT_BASE_URL);
        assert!(!client.has_credential());
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::new(None, "gemini-test", "https://example.test/");
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn extract_text_joins_parts() {
        let json = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "there" } ] } }
            ]
        });
        assert_eq!(extract_text(&json).unwrap(), "Hello there");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let json = serde_json::json!({ "candidates": [] });
        assert!(extract_text(&json).is_err());
    }
}
