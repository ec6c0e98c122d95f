//! services/engine/src/adapters/gemini.rs
//!
//! This module contains the adapter for the Gemini `generateContent`
//! endpoint. It implements the `TextGenerationService` port from the
//! `core` crate; the vendor wire envelope lives here and nowhere else.

use async_trait::async_trait;
use recall_core::domain::GenerationPayload;
use recall_core::ports::{TextGenerationService, UpstreamError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{Config, ConfigError};

//=========================================================================================
// Request Envelope
//=========================================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemContent<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

/// The system instruction carries a single part object rather than an
/// array; the endpoint accepts both spellings.
#[derive(Debug, Serialize)]
struct SystemContent<'a> {
    parts: Part<'a>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_payload(payload: &'a GenerationPayload) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: &payload.user_text,
                }],
            }],
            system_instruction: SystemContent {
                parts: Part {
                    text: &payload.system_instruction,
                },
            },
            generation_config: GenerationConfig {
                response_mime_type: &payload.response_mime_type,
            },
        }
    }
}

//=========================================================================================
// Response Envelope
//=========================================================================================

/// This matches the actual JSON structure returned by the endpoint.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPart>,
}

#[derive(Debug, Deserialize)]
struct TextPart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// The first candidate's first part, or an empty string when the model
    /// returned no candidates at all.
    fn extract_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default()
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` against the Gemini
/// REST API.
#[derive(Clone)]
pub struct GeminiAdapter {
    http: reqwest::Client,
    endpoint: String,
}

impl GeminiAdapter {
    /// Creates a new `GeminiAdapter`.
    ///
    /// The API key and request timeout are attached to the client here,
    /// once; individual calls only supply a body.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut key = reqwest::header::HeaderValue::from_str(&config.gemini_api_key)
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.generation_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let endpoint = format!(
            "{}/models/{}:generateContent?key={}",
            config.gemini_base_url.trim_end_matches('/'),
            config.gemini_model,
            config.gemini_api_key
        );

        Ok(Self { http, endpoint })
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for GeminiAdapter {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String, UpstreamError> {
        let body = GenerateContentRequest::from_payload(payload);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("generation endpoint returned {}: {}", status, body);
            return Err(UpstreamError::Response {
                status: status.as_u16(),
                body,
            });
        }

        let decoded: GenerateContentResponse = response.json().await.map_err(|e| {
            UpstreamError::Response {
                status: status.as_u16(),
                body: format!("undecodable response envelope: {}", e),
            }
        })?;

        Ok(decoded.extract_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> GenerationPayload {
        GenerationPayload {
            system_instruction: "follow the format".to_string(),
            user_text: "Generate 2 flashcards for the topic 'X'.\n\nSOURCE CONTENT:\nY"
                .to_string(),
            response_mime_type: "application/json".to_string(),
        }
    }

    #[test]
    fn request_envelope_matches_the_wire_format() {
        let payload = payload();
        let body = GenerateContentRequest::from_payload(&payload);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [
                    {"parts": [{"text": "Generate 2 flashcards for the topic 'X'.\n\nSOURCE CONTENT:\nY"}]}
                ],
                "systemInstruction": {"parts": {"text": "follow the format"}},
                "generationConfig": {"responseMimeType": "application/json"}
            })
        );
    }

    #[test]
    fn extracts_the_first_candidates_first_part() {
        let raw = json!({
            "candidates": [
                {"content": {"parts": [{"text": "[]"}, {"text": "ignored"}]}},
                {"content": {"parts": [{"text": "also ignored"}]}}
            ]
        });
        let decoded: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(decoded.extract_text(), "[]");
    }

    #[test]
    fn zero_candidates_extracts_an_empty_string() {
        let decoded: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(decoded.extract_text(), "");

        let decoded: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(decoded.extract_text(), "");
    }

    #[test]
    fn candidate_without_parts_extracts_an_empty_string() {
        let decoded: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": {}}]})).unwrap();
        assert_eq!(decoded.extract_text(), "");
    }
}
