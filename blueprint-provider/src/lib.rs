//! # Blueprint Providers
//!
//! Provider implementations for generation services.

#[cfg(feature = "gemini")]
pub mod gemini;
#[cfg(feature = "openai")]
pub mod openai;

// Re-exports
#[cfg(feature = "gemini")]
pub use gemini::{GeminiBuilder, GeminiProvider};
#[cfg(feature = "openai")]
pub use openai::{OpenAiBuilder, OpenAiProvider};

#[cfg(feature = "openai")]
use blueprint_core::error::BlueprintError;

/// Create a DeepSeek provider (OpenAI-compatible)
///
/// DeepSeek speaks the OpenAI protocol at a different endpoint. It has no
/// native response schema, so designers built on it fall back to JSON mode.
///
/// # Example
///
/// ```ignore
/// use blueprint_provider::deepseek;
///
/// let provider = deepseek("your-api-key")?;
/// ```
#[cfg(feature = "openai")]
pub fn deepseek(api_key: impl Into<String>) -> Result<OpenAiProvider, BlueprintError> {
    OpenAiProvider::builder()
        .api_key(api_key)
        .api_base("https://api.deepseek.com/v1")
        .build_with_id("deepseek", "DeepSeek")
}

#[cfg(all(test, feature = "openai"))]
mod tests {
    use super::*;
    use blueprint_core::provider::Provider;

    #[test]
    fn test_deepseek_identity() {
        let provider = deepseek("key").unwrap();
        assert_eq!(provider.info().id, "deepseek");
        assert_eq!(provider.info().name, "DeepSeek");
    }
}
