/// Gemini client: the single point of entry for all generative-AI calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini or Imagen APIs directly.
/// All text and image generation MUST go through this module.
///
/// Calls are never retried. Callers decide whether a failure is fatal (enrichment)
/// or degrades to a placeholder (per-gene visuals).
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for enrichment and descriptions.
pub const TEXT_MODEL: &str = "gemini-2.5-flash";
/// Model used for illustrative images.
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";
const IMAGE_ASPECT_RATIO: &str = "4:3";
const IMAGE_MIME_TYPE: &str = "image/png";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Image generation returned no image")]
    NoImage,

    #[error("Response failed validation: {0}")]
    Invalid(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types: generateContent
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types: Imagen predict
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    aspect_ratio: &'a str,
    output_options: OutputOptions<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions<'a> {
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
}

impl PredictResponse {
    /// Base64 payload of the first prediction that carries image bytes.
    pub fn first_image(&self) -> Option<&str> {
        self.predictions
            .iter()
            .filter_map(|p| p.bytes_base64_encoded.as_deref())
            .find(|b| !b.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single Gemini client used by the analysis backend.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// Plain-text generation. Returns the trimmed text of the first candidate.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![user_content(prompt)],
            generation_config: None,
        };
        let response: GenerateContentResponse = self
            .post(&self.model_url(TEXT_MODEL, "generateContent"), &request)
            .await?;
        log_usage(&response);

        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.trim().to_string())
    }

    /// Structured generation constrained by `schema`; the text response is deserialized as JSON.
    pub async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<T, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![user_content(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };
        let response: GenerateContentResponse = self
            .post(&self.model_url(TEXT_MODEL, "generateContent"), &request)
            .await?;
        log_usage(&response);

        let text = response.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
    }

    /// Generates one 4:3 PNG and returns its base64 payload.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, LlmError> {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };
        let response: PredictResponse = self
            .post(&self.model_url(IMAGE_MODEL, "predict"), &request)
            .await?;

        response
            .first_image()
            .map(str::to_string)
            .ok_or(LlmError::NoImage)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, LlmError> {
        debug!("POST {url}");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        Ok(response.json::<R>().await?)
    }
}

fn user_content(prompt: &str) -> RequestContent<'_> {
    RequestContent {
        role: "user",
        parts: vec![RequestPart { text: prompt }],
    }
}

fn log_usage(response: &GenerateContentResponse) {
    if let Some(usage) = &response.usage_metadata {
        debug!(
            "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
            usage.prompt_token_count, usage.candidates_token_count
        );
    }
}

/// Pulls `error.message` out of a Google error body, falling back to the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[{\"go_id\": \"GO:1\"}]\n```";
        assert_eq!(strip_json_fences(input), "[{\"go_id\": \"GO:1\"}]");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"} ";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "High expression "}, {"text": "in roots."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 5}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("High expression in roots."));
        assert_eq!(
            response.usage_metadata.unwrap().prompt_token_count,
            Some(12)
        );
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_predict_response_first_image() {
        let response: PredictResponse = serde_json::from_value(json!({
            "predictions": [{"bytesBase64Encoded": "iVBORw0KGgo=", "mimeType": "image/png"}]
        }))
        .unwrap();
        assert_eq!(response.first_image(), Some("iVBORw0KGgo="));

        let empty: PredictResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_image().is_none());
    }

    #[test]
    fn test_request_bodies_use_camel_case() {
        let schema = json!({"type": "ARRAY"});
        let request = GenerateContentRequest {
            contents: vec![user_content("hello")],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");

        let predict = PredictRequest {
            instances: vec![PredictInstance { prompt: "p" }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: IMAGE_MIME_TYPE,
                },
            },
        };
        let value = serde_json::to_value(&predict).unwrap();
        assert_eq!(value["parameters"]["sampleCount"], 1);
        assert_eq!(value["parameters"]["aspectRatio"], "4:3");
        assert_eq!(value["parameters"]["outputOptions"]["mimeType"], "image/png");
    }

    #[test]
    fn test_parse_error_message_prefers_google_body() {
        let body = r#"{"error": {"code": 429, "message": "Resource exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(parse_error_message(body.to_string()), "Resource exhausted");
        assert_eq!(parse_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_client_trims_trailing_slash_from_base_url() {
        let client = GeminiClient::new("key".to_string(), "http://localhost:9000/v1beta/").unwrap();
        assert_eq!(
            client.model_url(TEXT_MODEL, "generateContent"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
