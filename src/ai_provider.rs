use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::core::{HealthError, Result};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for AIConfig {
    fn default() -> Self {
        AIConfig {
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_GEMINI_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_output_tokens: Some(1024),
            temperature: Some(0.4),
        }
    }
}

/// An image ready to be sent inline to a vision model.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        ImagePayload {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let mime_type = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some(other) => {
                return Err(HealthError::Provider(format!("Unsupported image type: {}", other)));
            }
            None => "image/jpeg",
        };
        Ok(ImagePayload::new(mime_type, data))
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }
}

/// Seam between the advisor and whatever produces model text.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String>;

    async fn analyze_image(&self, prompt: &str, image: &ImagePayload) -> Result<String>;
}

pub struct GeminiClient {
    config: AIConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: AIConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(GeminiClient { config, http_client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, parts: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": {
                "maxOutputTokens": self.config.max_output_tokens,
                "temperature": self.config.temperature
            }
        })
    }

    async fn generate_content(&self, parts: Vec<serde_json::Value>) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| HealthError::Provider("Gemini API key required".to_string()))?;

        let request_body = self.request_body(parts);
        debug!(model = %self.config.model, "sending generateContent request");

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key.as_str())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.map_err(reqwest::Error::without_url)?;
            return Err(HealthError::Provider(format!(
                "Gemini API error ({}): {}",
                status, error_text
            )));
        }

        let response_json: serde_json::Value =
            response.json().await.map_err(reqwest::Error::without_url)?;
        extract_text(&response_json)
    }
}

/// Pull the first candidate's text out of a `generateContent` response
pub fn extract_text(response_json: &serde_json::Value) -> Result<String> {
    response_json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| HealthError::Provider("Invalid Gemini response format".to_string()))
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(vec![serde_json::json!({ "text": prompt })])
            .await
    }

    async fn analyze_image(&self, prompt: &str, image: &ImagePayload) -> Result<String> {
        self.generate_content(vec![
            serde_json::json!({ "text": prompt }),
            serde_json::json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.to_base64()
                }
            }),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Stay hydrated." }], "role": "model" }
            }]
        });
        assert_eq!(extract_text(&body).unwrap(), "Stay hydrated.");

        let blocked = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(extract_text(&blocked).is_err());
    }

    #[test]
    fn test_endpoint_uses_model() {
        let client = GeminiClient::new(AIConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..AIConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let client = GeminiClient::new(AIConfig::default()).unwrap();
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, HealthError::Provider(msg) if msg.contains("API key")));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        // nothing listens on the discard port
        let client = GeminiClient::new(AIConfig {
            api_key: Some("SECRET-KEY-123".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(5),
            ..AIConfig::default()
        })
        .unwrap();

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, HealthError::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"));
        assert!(!format!("{:?}", err).contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_image_payload_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chest.PNG");
        std::fs::write(&path, [0x89, 0x50, 0x4e, 0x47]).unwrap();

        let image = ImagePayload::from_path(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.to_base64(), "iVBORw==");

        let bad = dir.path().join("notes.txt");
        std::fs::write(&bad, "x").unwrap();
        assert!(ImagePayload::from_path(&bad).is_err());
    }
}
