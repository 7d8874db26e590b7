//! OpenAI-compatible provider implementation using the async-openai crate.
//!
//! Serves OpenAI itself and compatible endpoints (DeepSeek, Azure-style
//! gateways). Structured output goes through `response_format`, with the
//! schema rendered in the JSON Schema dialect.

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    ResponseFormat as OpenAIResponseFormat,
    ResponseFormatJsonSchema as OpenAIResponseFormatJsonSchema,
};
use async_openai::Client;
use async_trait::async_trait;
use blueprint_core::config::{Config, DEFAULT_TIMEOUT};
use blueprint_core::error::BlueprintError;
use blueprint_core::provider::Provider;
use blueprint_core::schema::SchemaDialect;
use blueprint_core::types::*;
use std::sync::Arc;
use std::time::Duration;

/// OpenAI provider using async-openai
///
/// Each call, including the client's own backoff on rate limits, is bounded
/// by the configured timeout.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client<OpenAIConfig>,
    info: Arc<ProviderInfo>,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("info", &self.info)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a new OpenAI provider with default configuration
    pub fn new(api_key: impl Into<String>) -> Result<Self, BlueprintError> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for more configuration options
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::default()
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

    fn convert_message(msg: &Message) -> Result<ChatCompletionRequestMessage, BlueprintError> {
        let content = msg.content.clone();
        let built = match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::System),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::User),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()
                .map(ChatCompletionRequestMessage::Assistant),
        };
        built.map_err(|e| {
            BlueprintError::provider(format!("Failed to build {:?} message: {}", msg.role, e))
        })
    }

    fn convert_response_format(format: &ResponseFormat) -> OpenAIResponseFormat {
        match format {
            ResponseFormat::Text => OpenAIResponseFormat::Text,
            ResponseFormat::JsonObject => OpenAIResponseFormat::JsonObject,
            ResponseFormat::JsonSchema {
                name,
                schema,
                strict,
            } => OpenAIResponseFormat::JsonSchema {
                json_schema: OpenAIResponseFormatJsonSchema {
                    name: name.clone(),
                    schema: Some(schema.to_value(SchemaDialect::JsonSchema)),
                    strict: Some(*strict),
                    description: None,
                },
            },
        }
    }

    fn build_request(
        &self,
        req: &GenerationRequest,
    ) -> Result<CreateChatCompletionRequest, BlueprintError> {
        let messages = req
            .messages
            .iter()
            .map(Self::convert_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&req.model).messages(messages);

        if let Some(max_tokens) = req.max_tokens {
            builder.max_tokens(max_tokens);
        }
        if let Some(temperature) = req.temperature {
            builder.temperature(temperature);
        }
        if let Some(response_format) = &req.response_format {
            builder.response_format(Self::convert_response_format(response_format));
        }

        builder
            .build()
            .map_err(|e| BlueprintError::provider(format!("Failed to build request: {}", e)))
    }

    fn convert_response(response: CreateChatCompletionResponse) -> GenerationResponse {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: Message::assistant(choice.message.content.unwrap_or_default()),
                finish_reason: choice
                    .finish_reason
                    .map_or(FinishReason::Stop, |r| match r {
                        async_openai::types::FinishReason::Stop => FinishReason::Stop,
                        async_openai::types::FinishReason::Length => FinishReason::Length,
                        async_openai::types::FinishReason::ContentFilter => {
                            FinishReason::ContentFilter
                        }
                        other => FinishReason::Other(format!("{:?}", other).to_lowercase()),
                    }),
            })
            .collect();

        let usage = response.usage.map_or_else(Usage::default, |u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        GenerationResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
            created: Some(response.created as u64),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        self.info.clone()
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError> {
        let openai_req = self.build_request(&req)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(openai_req))
            .await
            .map_err(|_| {
                BlueprintError::timeout(format!("no response within {:?}", self.timeout))
            })?
            .map_err(|e| BlueprintError::provider(format!("OpenAI API error: {}", e)))?;

        Ok(Self::convert_response(response))
    }
}

/// Builder for OpenAI provider with custom configuration
#[derive(Debug, Default)]
pub struct OpenAiBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    org_id: Option<String>,
    timeout: Option<Duration>,
}

impl OpenAiBuilder {
    /// Set API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set API base URL (for OpenAI-compatible APIs like DeepSeek)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set organization ID
    pub fn organization(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    /// Set the per-call timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<OpenAiProvider, BlueprintError> {
        self.build_with_id("openai", "OpenAI")
    }

    /// Build a provider with a custom provider ID and name
    ///
    /// The ID selects the JSON output strategy, so compatible endpoints
    /// should pass their own (`"deepseek"`, `"azure"`).
    pub fn build_with_id(
        self,
        provider_id: impl Into<String>,
        provider_name: impl Into<String>,
    ) -> Result<OpenAiProvider, BlueprintError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| BlueprintError::configuration("API key is required"))?;

        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(api_base) = self.api_base {
            config = config.with_api_base(api_base);
        }
        if let Some(org_id) = self.org_id {
            config = config.with_org_id(org_id);
        }

        Ok(OpenAiProvider {
            client: Client::with_config(config),
            info: Arc::new(ProviderInfo {
                id: provider_id.into(),
                name: provider_name.into(),
            }),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}
