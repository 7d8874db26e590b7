//! Google Gemini provider over the `generateContent` REST endpoint.
//!
//! Structured output is requested natively: a [`ResponseFormat::JsonSchema`]
//! becomes `responseMimeType: application/json` plus a `responseSchema` in
//! Gemini's schema dialect.

use blueprint_core::config::Config;
use blueprint_core::error::BlueprintError;
use blueprint_core::provider::Provider;
use blueprint_core::schema::SchemaDialect;
use blueprint_core::types::*;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Public Gemini API endpoint
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

const JSON_MIME_TYPE: &str = "application/json";

// Wire types

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum GeminiRole {
    User,
    Model,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<GeminiRole>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn text(role: Option<GeminiRole>, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![GeminiPart {
                text: Some(text.into()),
            }],
        }
    }

    fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<String>()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.max_output_tokens.is_none()
            && self.response_mime_type.is_none()
            && self.response_schema.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    index: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
    #[serde(default)]
    response_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

/// Gemini provider using reqwest
#[derive(Clone)]
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    info: Arc<ProviderInfo>,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("info", &self.info)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GeminiProvider {
    /// Create a provider against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, BlueprintError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for more configuration options
    pub fn builder() -> GeminiBuilder {
        GeminiBuilder::default()
    }

    /// Create a provider from runtime configuration
    pub fn from_config(config: &Config) -> Result<Self, BlueprintError> {
        let mut builder = Self::builder()
            .api_key(config.api_key())
            .timeout(config.timeout());
        if let Some(api_base) = config.api_base() {
            builder = builder.api_base(api_base);
        }
        builder.build()
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            model
        )
    }

    /// Convert our request to Gemini's wire format
    fn build_request(req: &GenerationRequest) -> GenerateContentRequest {
        let contents = req
            .messages
            .iter()
            .filter_map(|m| match m.role {
                Role::System => None,
                Role::User => Some(GeminiContent::text(Some(GeminiRole::User), &m.content)),
                Role::Assistant => Some(GeminiContent::text(Some(GeminiRole::Model), &m.content)),
            })
            .collect();

        let system_instruction = req
            .system_instruction()
            .map(|text| GeminiContent::text(None, text));

        let mut generation_config = GenerationConfig {
            temperature: req.temperature,
            max_output_tokens: req.max_tokens,
            ..Default::default()
        };
        match &req.response_format {
            Some(ResponseFormat::JsonSchema { schema, .. }) => {
                generation_config.response_mime_type = Some(JSON_MIME_TYPE.to_string());
                generation_config.response_schema = Some(schema.to_value(SchemaDialect::Gemini));
            }
            Some(ResponseFormat::JsonObject) => {
                generation_config.response_mime_type = Some(JSON_MIME_TYPE.to_string());
            }
            Some(ResponseFormat::Text) | None => {}
        }

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: (!generation_config.is_empty()).then_some(generation_config),
        }
    }

    /// Convert Gemini's response to ours
    fn convert_response(response: GenerateContentResponse, model: &str) -> GenerationResponse {
        let choices = response
            .candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| Choice {
                index: candidate.index.unwrap_or(i as u32),
                message: Message::assistant(
                    candidate
                        .content
                        .as_ref()
                        .map(GeminiContent::joined_text)
                        .unwrap_or_default(),
                ),
                finish_reason: Self::convert_finish_reason(candidate.finish_reason.as_deref()),
            })
            .collect();

        let usage = response.usage_metadata.unwrap_or_default();

        GenerationResponse {
            id: response.response_id.unwrap_or_default(),
            model: response.model_version.unwrap_or_else(|| model.to_string()),
            choices,
            usage: Usage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
            created: None,
        }
    }

    fn convert_finish_reason(reason: Option<&str>) -> FinishReason {
        match reason {
            None | Some("STOP") => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                FinishReason::ContentFilter
            }
            Some(other) => FinishReason::Other(other.to_string()),
        }
    }

    fn map_error(status: u16, message: String) -> BlueprintError {
        match status {
            400 => BlueprintError::invalid_request(message),
            401 | 403 => BlueprintError::authentication(message),
            408 | 504 => BlueprintError::timeout(message),
            429 => BlueprintError::rate_limit(message),
            _ => BlueprintError::provider(format!("Gemini API error ({}): {}", status, message)),
        }
    }

    fn map_transport_error(err: reqwest::Error) -> BlueprintError {
        if err.is_timeout() {
            BlueprintError::timeout(err.to_string())
        } else {
            BlueprintError::Network(err)
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError> {
        let url = self.endpoint(&req.model);
        let body = Self::build_request(&req);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key).map_err(|e| {
                BlueprintError::authentication(format!("Invalid API key format: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME_TYPE));

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            let message = serde_json::from_str::<GeminiErrorResponse>(&error_body)
                .map(|e| e.error.message)
                .unwrap_or(error_body);
            return Err(Self::map_error(status.as_u16(), message));
        }

        let text = response.text().await.map_err(Self::map_transport_error)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;

        Ok(Self::convert_response(parsed, &req.model))
    }
}

/// Builder for the Gemini provider
#[derive(Debug, Default)]
pub struct GeminiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiBuilder {
    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the HTTP client timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<GeminiProvider, BlueprintError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BlueprintError::configuration("API key is required"))?;

        let http = reqwest::Client::builder()
            .timeout(
                self.timeout
                    .unwrap_or(blueprint_core::config::DEFAULT_TIMEOUT),
            )
            .build()?;

        Ok(GeminiProvider {
            http,
            api_key,
            api_base: self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            info: Arc::new(ProviderInfo {
                id: "gemini".to_string(),
                name: "Google Gemini".to_string(),
            }),
        })
    }
}
