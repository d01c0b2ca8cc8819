use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extractor::TagExtractor;
use crate::extractor::models::MoodTags;
use crate::extractor::prompt::{build_prompt, response_schema};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The only extractor failure text that leaves this module.
pub const GENERIC_FAILURE: &str = "Failed to analyze mood using AI.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

pub struct GeminiTagExtractor {
    http_client: Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
}

impl GeminiTagExtractor {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            http_client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            api_base: GEMINI_API_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    async fn request_tags(&self, api_key: &str, user_text: &str) -> Result<MoodTags> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(user_text)),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Service(format!("Gemini returned {}: {}", status, error_text)));
        }

        let body: GenerateContentResponse = response.json().await?;
        parse_tags(body)
    }
}

fn parse_tags(body: GenerateContentResponse) -> Result<MoodTags> {
    let text = body
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.text)
        .ok_or_else(|| AppError::Service("Gemini response had no text candidate".into()))?;

    Ok(serde_json::from_str(text.trim())?)
}

#[async_trait]
impl TagExtractor for GeminiTagExtractor {
    async fn extract(&self, user_text: &str) -> Result<MoodTags> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::Config("GEMINI_API_KEY not set".into()))?;

        debug!("Requesting mood tags from {}", self.model);

        match self.request_tags(api_key, user_text).await {
            Ok(tags) => {
                info!("Extracted tags: {}", tags);
                Ok(tags)
            }
            Err(e) => {
                error!("Gemini service error: {}", e);
                Err(AppError::Service(GENERIC_FAILURE.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CannedServer;

    fn response(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    fn keyed_extractor(api_base: &str) -> GeminiTagExtractor {
        let config = Config {
            gemini_api_key: Some("test-key".into()),
            ..Config::default()
        };
        GeminiTagExtractor::new(&config)
            .unwrap()
            .with_api_base(api_base)
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_any_request() {
        let server = CannedServer::start("200 OK", r#"{"candidates": []}"#).await;
        let extractor = GeminiTagExtractor::new(&Config::default())
            .unwrap()
            .with_api_base(server.base_url.clone());

        let err = extractor.extract("rainy sunday").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {:?}", err);
        assert_eq!(server.hits(), 0);
    }

    #[tokio::test]
    async fn test_rate_limited_response_does_not_leak_provider_text() {
        let server = CannedServer::start(
            "429 Too Many Requests",
            r#"{"error": {"code": 429, "message": "quota exhausted for project zz-4471"}}"#,
        )
        .await;

        match keyed_extractor(&server.base_url).extract("rainy sunday").await {
            Err(AppError::Service(msg)) => {
                assert_eq!(msg, GENERIC_FAILURE);
                assert!(!msg.contains("zz-4471"));
            }
            other => panic!("expected service error, got {:?}", other),
        }
        // single attempt, no retry
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_successful_response_yields_tags() {
        let server = CannedServer::start(
            "200 OK",
            r#"{"candidates": [{"content": {"parts": [
                {"text": "{\"genres\": [\"jazz\"], \"moods\": [\"chill\"], \"keywords\": [\"rain\"]}"}
            ]}}]}"#,
        )
        .await;

        let tags = keyed_extractor(&server.base_url)
            .extract("Sitting by the window watching the rain")
            .await
            .unwrap();
        assert_eq!(tags, MoodTags::new(["jazz"], ["chill"], ["rain"]));
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_service_error() {
        match keyed_extractor("http://127.0.0.1:9").extract("rainy sunday").await {
            Err(AppError::Service(msg)) => assert_eq!(msg, GENERIC_FAILURE),
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_uses_model() {
        let extractor = GeminiTagExtractor::new(&Config::default())
            .unwrap()
            .with_api_base("http://localhost:8080/v1beta/");
        assert_eq!(
            extractor.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some("hi".into()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: response_schema(),
            },
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_parse_tags_from_first_text_part() {
        let body = response(
            r#"{"candidates": [{"content": {"parts": [
                {"text": "{\"genres\": [\"Jazz\"], \"moods\": [\"chill\"], \"keywords\": []}"}
            ]}}]}"#,
        );
        let tags = parse_tags(body).unwrap();
        assert_eq!(tags.genres, vec!["Jazz"]);
        assert_eq!(tags.moods, vec!["chill"]);
        assert!(tags.keywords.is_empty());
    }

    #[test]
    fn test_parse_tags_rejects_missing_candidate() {
        let err = parse_tags(response(r#"{"candidates": []}"#)).unwrap_err();
        assert!(matches!(err, AppError::Service(_)));
    }

    #[test]
    fn test_parse_tags_rejects_non_json_text() {
        let body = response(r#"{"candidates": [{"content": {"parts": [{"text": "jazz, chill"}]}}]}"#);
        assert!(matches!(parse_tags(body).unwrap_err(), AppError::Json(_)));
    }
}
