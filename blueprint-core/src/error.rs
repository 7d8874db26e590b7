//! Error types for Blueprint operations.

use crate::schema::SchemaViolation;

/// Error raised by providers, layers and the response decoder.
///
/// This is the diagnostic taxonomy. It is logged, but callers of
/// [`AgentDesigner::generate_configuration`](crate::AgentDesigner::generate_configuration)
/// only ever see the collapsed [`GenerationError`].
#[derive(Debug, thiserror::Error)]
pub enum BlueprintError {
    /// Provider-specific errors
    #[error("Provider error: {0}")]
    Provider(String),

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response did not satisfy the requested schema
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaViolation),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limit errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Invalid request errors
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Timeout errors
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl BlueprintError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limit(msg: impl Into<String>) -> Self {
        Self::RateLimit(msg.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the failure is transient. Only logged; generation makes a
    /// single attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BlueprintError::Network(_) | BlueprintError::Timeout(_) | BlueprintError::RateLimit(_)
        )
    }
}

/// User-facing outcome of a generation attempt.
///
/// The messages are shown verbatim; the underlying cause of a
/// `GenerationFailed` is only written to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Empty or whitespace-only goal. No request is made.
    #[error("Please enter a goal for your AI agent.")]
    InvalidGoal,

    /// Transport, provider or decoding failure.
    #[error("Failed to generate agent configuration. Please check your API key and try again.")]
    GenerationFailed,

    /// A generation is already outstanding, so the trigger is disabled.
    #[error("An agent configuration is already being generated.")]
    Busy,
}
