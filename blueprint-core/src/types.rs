//! Core types for generation requests.

use crate::schema::SchemaNode;
use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: text.into(),
        }
    }

    /// Create a new system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }
}

/// Response format requested from the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Plain text response
    Text,
    /// JSON object response (no schema enforcement by the provider)
    JsonObject,
    /// JSON response constrained by a schema
    JsonSchema {
        name: String,
        schema: SchemaNode,
        strict: bool,
    },
}

/// Provider-neutral generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set response format
    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = Some(response_format);
        self
    }

    /// Concatenated system instruction, if any
    pub fn system_instruction(&self) -> Option<String> {
        let parts = self
            .messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }
}

/// Usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Finish reason
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other(String),
}

/// Single candidate in a generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    pub finish_reason: FinishReason,
}

/// Provider-neutral generation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Usage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<u64>,
}

impl GenerationResponse {
    /// Text of the first choice
    pub fn text(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Provider information
#[derive(Debug, Clone)]
pub struct ProviderInfo {
    pub id: String,
    pub name: String,
}

/// Per-request context, used to correlate log lines
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub provider_id: String,
    pub model: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            provider_id: provider_id.into(),
            model: model.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_joins_system_messages() {
        let req = GenerationRequest::new(
            "m",
            vec![
                Message::system("first"),
                Message::user("goal"),
                Message::system("second"),
            ],
        );
        assert_eq!(req.system_instruction().as_deref(), Some("first\n\nsecond"));

        let req = GenerationRequest::new("m", vec![Message::user("goal")]);
        assert!(req.system_instruction().is_none());
    }

    #[test]
    fn test_request_carries_only_forwarded_settings() {
        let req = GenerationRequest::new("m", vec![Message::user("goal")]).with_temperature(0.5);
        let value = serde_json::to_value(&req).unwrap();

        let mut keys = value.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, vec!["messages", "model", "temperature"]);

        let unknown = serde_json::json!({"model": "m", "messages": [], "top_k": 3});
        let parsed: GenerationRequest = serde_json::from_value(unknown).unwrap();
        assert_eq!(serde_json::to_value(&parsed).unwrap()["top_k"], serde_json::Value::Null);
    }

    #[test]
    fn test_request_context_ids_are_unique() {
        let a = RequestContext::new("gemini", "m");
        let b = RequestContext::new("gemini", "m");
        assert_ne!(a.request_id, b.request_id);
    }
}
