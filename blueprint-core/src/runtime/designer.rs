//! AgentDesigner implementation.
//!
//! The designer turns a goal into one generation request, sends it through
//! the (possibly layered) provider, and decodes the answer into an
//! [`AgentConfiguration`].

use super::decoder::decode_configuration;
use crate::agent::{agent_configuration_schema, AgentConfiguration, SYSTEM_INSTRUCTION};
use crate::config::{Config, DEFAULT_MODEL};
use crate::error::{BlueprintError, GenerationError};
use crate::layer::Layer;
use crate::provider::Provider;
use crate::strategy::{detect_json_strategy, JsonOutputStrategy};
use crate::types::*;
use std::sync::Arc;
use tracing::Instrument;

/// Type-erased provider that can be shared across threads
type BoxedProvider = Arc<dyn Provider>;

/// Builder for composing a provider with layers into an [`AgentDesigner`].
///
/// ```ignore
/// let designer = AgentDesigner::builder(gemini_provider)
///     .layer(LoggingLayer::new())
///     .layer(TimeoutLayer::new(Duration::from_secs(60)))
///     .config(&config)
///     .finish();
/// ```
pub struct AgentDesignerBuilder<P> {
    provider: P,
    model: String,
    temperature: Option<f32>,
    validate_response: bool,
    json_strategy: Option<Box<dyn JsonOutputStrategy>>,
}

impl<P: Provider> AgentDesignerBuilder<P> {
    /// Create a new builder with a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            model: DEFAULT_MODEL.to_string(),
            temperature: None,
            validate_response: true,
            json_strategy: None,
        }
    }

    /// Add a layer to wrap the provider
    ///
    /// Each call wraps the previous provider in a new concrete type.
    pub fn layer<L>(self, layer: L) -> AgentDesignerBuilder<L::LayeredProvider>
    where
        L: Layer<P>,
    {
        AgentDesignerBuilder {
            provider: layer.layer(self.provider),
            model: self.model,
            temperature: self.temperature,
            validate_response: self.validate_response,
            json_strategy: self.json_strategy,
        }
    }

    /// Apply model and validation settings from a [`Config`]
    pub fn config(mut self, config: &Config) -> Self {
        self.model = config.model().to_string();
        self.validate_response = config.validate_response();
        self
    }

    /// Set the generation model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Toggle local re-validation of responses against the output schema
    pub fn validate_response(mut self, validate: bool) -> Self {
        self.validate_response = validate;
        self
    }

    /// Set a custom JSON output strategy
    ///
    /// If not set, the strategy is picked from the provider ID.
    pub fn json_strategy(mut self, strategy: Box<dyn JsonOutputStrategy>) -> Self {
        self.json_strategy = Some(strategy);
        self
    }

    /// Finish building and create an AgentDesigner
    pub fn finish(self) -> AgentDesigner {
        let provider = Arc::new(self.provider);
        let provider_id = provider.info().id.clone();

        let json_strategy = self
            .json_strategy
            .unwrap_or_else(|| detect_json_strategy(&provider_id));

        AgentDesigner {
            provider,
            model: self.model,
            temperature: self.temperature,
            validate_response: self.validate_response,
            json_strategy,
        }
    }
}

/// Request formatter and response decoder for agent configurations.
pub struct AgentDesigner {
    provider: BoxedProvider,
    model: String,
    temperature: Option<f32>,
    validate_response: bool,
    json_strategy: Box<dyn JsonOutputStrategy>,
}

impl std::fmt::Debug for AgentDesigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentDesigner")
            .field("provider", &self.provider.info())
            .field("model", &self.model)
            .field("json_strategy", &self.json_strategy.name())
            .field("validate_response", &self.validate_response)
            .finish()
    }
}

impl AgentDesigner {
    /// Create a new builder
    pub fn builder<P: Provider>(provider: P) -> AgentDesignerBuilder<P> {
        AgentDesignerBuilder::new(provider)
    }

    /// Get provider information
    pub fn info(&self) -> Arc<ProviderInfo> {
        self.provider.info()
    }

    /// Model used for generation
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the generation request for a goal.
    ///
    /// The goal is sent exactly as typed; only emptiness is checked.
    pub fn build_request(&self, goal: &str) -> Result<GenerationRequest, GenerationError> {
        if goal.trim().is_empty() {
            return Err(GenerationError::InvalidGoal);
        }

        let mut req = GenerationRequest::new(
            self.model.clone(),
            vec![Message::system(SYSTEM_INSTRUCTION), Message::user(goal)],
        );
        req.temperature = self.temperature;

        self.json_strategy
            .apply(&mut req, agent_configuration_schema())
            .map_err(|e| {
                tracing::error!(error = %e, "failed to attach output schema");
                GenerationError::GenerationFailed
            })?;

        Ok(req)
    }

    /// Decode raw provider text into a configuration
    pub fn decode(&self, raw: &str) -> Result<AgentConfiguration, BlueprintError> {
        let schema = self
            .validate_response
            .then(agent_configuration_schema);
        decode_configuration(raw, schema)
    }

    /// Generate an agent configuration for `goal`.
    ///
    /// Makes at most one provider call. An empty goal fails with
    /// [`GenerationError::InvalidGoal`] before anything is sent; every other
    /// failure is logged and collapsed into
    /// [`GenerationError::GenerationFailed`].
    pub async fn generate_configuration(
        &self,
        goal: &str,
    ) -> Result<AgentConfiguration, GenerationError> {
        let req = self.build_request(goal)?;

        let ctx = RequestContext::new(self.provider.info().id.clone(), self.model.clone());
        let span = tracing::info_span!(
            "generate_configuration",
            request_id = %ctx.request_id,
            provider = %ctx.provider_id,
            model = %ctx.model,
        );

        async {
            match self.request_and_decode(req).await {
                Ok(config) => {
                    tracing::info!(
                        agent_creation_id = %config.agent_creation_id,
                        "agent configuration generated"
                    );
                    Ok(config)
                }
                Err(err) => {
                    tracing::error!(
                        error = %err,
                        retryable = err.is_retryable(),
                        "error calling generation API"
                    );
                    Err(GenerationError::GenerationFailed)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn request_and_decode(
        &self,
        req: GenerationRequest,
    ) -> Result<AgentConfiguration, BlueprintError> {
        let response = self.provider.generate(req).await?;

        let text = response
            .text()
            .ok_or_else(|| BlueprintError::provider("No choices in response"))?;

        tracing::debug!(
            response_id = %response.id,
            total_tokens = response.usage.total_tokens,
            bytes = text.len(),
            "decoding response"
        );

        self.decode(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaDialect;
    use crate::strategy::JsonModeStrategy;
    use crate::testing::{sample_configuration_json, MockProvider};

    fn designer(provider: Arc<MockProvider>) -> AgentDesigner {
        AgentDesigner::builder(provider).finish()
    }

    #[tokio::test]
    async fn test_blank_goal_never_calls_provider() {
        let provider = Arc::new(MockProvider::sample());
        let designer = designer(provider.clone());

        for goal in ["", "   ", "\n\t"] {
            let err = designer.generate_configuration(goal).await.unwrap_err();
            assert_eq!(err, GenerationError::InvalidGoal);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let provider = Arc::new(MockProvider::sample());
        let designer = designer(provider.clone());

        designer
            .generate_configuration("  Summarise support tickets  ")
            .await
            .unwrap();

        let req = provider.last_request().unwrap();
        assert_eq!(req.model, DEFAULT_MODEL);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0], Message::system(SYSTEM_INSTRUCTION));
        assert_eq!(req.messages[1], Message::user("  Summarise support tickets  "));
        match req.response_format {
            Some(ResponseFormat::JsonSchema { schema, .. }) => {
                let rendered = schema.to_value(SchemaDialect::Gemini);
                assert_eq!(rendered["required"].as_array().unwrap().len(), 7);
            }
            other => panic!("expected a response schema, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decoded_values_equal_literal() {
        let provider = Arc::new(MockProvider::sample());
        let config = designer(provider)
            .generate_configuration("Monitor brand mentions")
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            sample_configuration_json()
        );
    }

    #[tokio::test]
    async fn test_missing_required_field_is_generic_failure() {
        let mut literal = sample_configuration_json();
        literal["performance_predictions"]
            .as_object_mut()
            .unwrap()
            .remove("confidence_interval");
        let provider = Arc::new(MockProvider::replying(literal.to_string()));

        for validate in [true, false] {
            let designer = AgentDesigner::builder(provider.clone())
                .validate_response(validate)
                .finish();
            let err = designer
                .generate_configuration("Monitor brand mentions")
                .await
                .unwrap_err();
            assert_eq!(err, GenerationError::GenerationFailed);
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_generic_failure() {
        let provider = Arc::new(MockProvider::replying("{\"agent_creation_id\": "));
        let err = designer(provider)
            .generate_configuration("Monitor brand mentions")
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::GenerationFailed);
    }

    #[tokio::test]
    async fn test_provider_rejection_is_generic_failure() {
        let provider = Arc::new(MockProvider::failing());
        let err = designer(provider.clone())
            .generate_configuration("Monitor brand mentions")
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::GenerationFailed);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_config_and_strategy_overrides() {
        let provider = Arc::new(MockProvider::sample().with_id("deepseek"));
        let config = Config::new("key").unwrap().with_model("deepseek-chat");
        let designer = AgentDesigner::builder(provider.clone())
            .config(&config)
            .temperature(0.2)
            .finish();

        designer.generate_configuration("Track invoices").await.unwrap();

        let req = provider.last_request().unwrap();
        assert_eq!(req.model, "deepseek-chat");
        assert_eq!(req.temperature, Some(0.2));
        assert!(matches!(req.response_format, Some(ResponseFormat::JsonObject)));
        assert_eq!(req.messages.len(), 3);

        let designer = AgentDesigner::builder(Arc::new(MockProvider::sample()))
            .json_strategy(Box::new(JsonModeStrategy::with_system_message(false)))
            .finish();
        let req = designer.build_request("Track invoices").unwrap();
        assert_eq!(req.messages.len(), 2);
        assert!(req.messages[1].content.starts_with("Track invoices\n\n"));
    }
}
