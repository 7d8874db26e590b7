//! JSON output strategies for different providers.
//!
//! - JsonSchemaStrategy: providers that accept a response schema natively (Gemini, OpenAI)
//! - JsonModeStrategy: providers that only support basic JSON object mode (DeepSeek)

use crate::error::BlueprintError;
use crate::schema::{SchemaDialect, SchemaNode};
use crate::types::{GenerationRequest, Message, ResponseFormat, Role};

/// Strategy for requesting JSON output from a provider.
pub trait JsonOutputStrategy: Send + Sync {
    /// Get the strategy name for debugging
    fn name(&self) -> &str;

    /// Modify the request so the provider answers with JSON matching `schema`.
    fn apply(&self, req: &mut GenerationRequest, schema: &SchemaNode) -> Result<(), BlueprintError>;
}

/// Native response-schema strategy.
#[derive(Debug, Clone)]
pub struct JsonSchemaStrategy {
    /// Whether to enable strict mode
    pub strict: bool,
}

impl JsonSchemaStrategy {
    /// Create a new JSON Schema strategy.
    ///
    /// Strict mode stays off: the agent configuration has optional fields,
    /// which strict OpenAI schemas reject.
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Create a new JSON Schema strategy with configurable strict mode
    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }
}

impl Default for JsonSchemaStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonOutputStrategy for JsonSchemaStrategy {
    fn name(&self) -> &str {
        "JsonSchemaStrategy"
    }

    fn apply(&self, req: &mut GenerationRequest, schema: &SchemaNode) -> Result<(), BlueprintError> {
        req.response_format = Some(ResponseFormat::JsonSchema {
            name: "agent_configuration".to_string(),
            schema: schema.clone(),
            strict: self.strict,
        });

        Ok(())
    }
}

/// JSON Mode strategy for providers without schema support.
///
/// Sets the response format to a plain JSON object and writes the schema into
/// the prompt instead.
#[derive(Debug, Clone)]
pub struct JsonModeStrategy {
    /// Inject the schema as a system message (true) or append it to the last user message (false)
    pub use_system_message: bool,
}

impl JsonModeStrategy {
    /// Create a new JSON Mode strategy that uses system messages
    pub fn new() -> Self {
        Self {
            use_system_message: true,
        }
    }

    /// Create a new JSON Mode strategy with configurable message injection
    pub fn with_system_message(use_system_message: bool) -> Self {
        Self { use_system_message }
    }

    fn build_json_instruction(schema: &SchemaNode) -> Result<String, BlueprintError> {
        let schema_str = serde_json::to_string_pretty(&schema.to_value(SchemaDialect::JsonSchema))?;
        Ok(format!(
            "You must respond with valid JSON that matches this schema:\n```json\n{}\n```\n\nIMPORTANT:\n\
            1. Only return the JSON object, nothing else\n\
            2. Ensure all required fields are present\n\
            3. Follow the schema structure exactly\n\
            4. Use the correct data types for each field",
            schema_str
        ))
    }
}

impl Default for JsonModeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonOutputStrategy for JsonModeStrategy {
    fn name(&self) -> &str {
        "JsonModeStrategy"
    }

    fn apply(&self, req: &mut GenerationRequest, schema: &SchemaNode) -> Result<(), BlueprintError> {
        req.response_format = Some(ResponseFormat::JsonObject);

        let instruction = Self::build_json_instruction(schema)?;

        if self.use_system_message {
            // After any existing system prompt, so the role instruction stays first
            let at = req
                .messages
                .iter()
                .take_while(|m| m.role == Role::System)
                .count();
            req.messages.insert(at, Message::system(instruction));
        } else if let Some(last_msg) = req
            .messages
            .iter_mut()
            .rev()
            .find(|m| m.role == Role::User)
        {
            last_msg.content.push_str("\n\n");
            last_msg.content.push_str(&instruction);
        } else {
            req.messages.push(Message::user(instruction));
        }

        Ok(())
    }
}

/// Pick the JSON output strategy for a provider id.
pub fn detect_json_strategy(provider_id: &str) -> Box<dyn JsonOutputStrategy> {
    match provider_id {
        "gemini" | "openai" | "azure" => Box::new(JsonSchemaStrategy::new()),

        "deepseek" => Box::new(JsonModeStrategy::new()),

        // Unknown providers may not understand a schema parameter
        _ => Box::new(JsonModeStrategy::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ObjectSchema;

    fn schema() -> SchemaNode {
        ObjectSchema::new()
            .property("name", SchemaNode::string())
            .required(["name"])
            .into()
    }

    #[test]
    fn test_json_schema_strategy() {
        let strategy = JsonSchemaStrategy::new();
        let mut req = GenerationRequest::new("test-model", vec![]);

        strategy.apply(&mut req, &schema()).unwrap();

        match req.response_format {
            Some(ResponseFormat::JsonSchema {
                name,
                schema: s,
                strict,
            }) => {
                assert_eq!(name, "agent_configuration");
                assert_eq!(s, schema());
                assert!(!strict);
            }
            _ => panic!("Expected JsonSchema response format"),
        }
    }

    #[test]
    fn test_json_mode_strategy_keeps_system_prompt_first() {
        let strategy = JsonModeStrategy::new();
        let mut req = GenerationRequest::new(
            "test-model",
            vec![Message::system("You are an architect."), Message::user("Hello")],
        );

        strategy.apply(&mut req, &schema()).unwrap();

        assert!(matches!(req.response_format, Some(ResponseFormat::JsonObject)));
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].content, "You are an architect.");
        assert_eq!(req.messages[1].role, Role::System);
        assert!(req.messages[1].content.contains("\"required\""));
        assert_eq!(req.messages[2].role, Role::User);
    }

    #[test]
    fn test_json_mode_strategy_appends_to_user_message() {
        let strategy = JsonModeStrategy::with_system_message(false);
        let mut req = GenerationRequest::new("test-model", vec![Message::user("Hello")]);

        strategy.apply(&mut req, &schema()).unwrap();

        assert_eq!(req.messages.len(), 1);
        assert!(req.messages[0].content.starts_with("Hello\n\nYou must respond"));
    }

    #[test]
    fn test_detect_json_strategy() {
        assert_eq!(detect_json_strategy("gemini").name(), "JsonSchemaStrategy");
        assert_eq!(detect_json_strategy("openai").name(), "JsonSchemaStrategy");
        assert_eq!(detect_json_strategy("deepseek").name(), "JsonModeStrategy");
        assert_eq!(detect_json_strategy("unknown").name(), "JsonModeStrategy");
    }
}
