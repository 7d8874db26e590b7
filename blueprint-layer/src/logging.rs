//! Logging layer for provider calls.
//!
//! Emits one `debug` event per outbound request and one per outcome, as
//! structured `tracing` fields so a failed generation can be traced back to
//! the model, the output mode and the provider's answer.

use async_trait::async_trait;
use blueprint_core::error::BlueprintError;
use blueprint_core::impl_layered_provider;
use blueprint_core::layer::{Layer, LayeredProvider};
use blueprint_core::provider::Provider;
use blueprint_core::types::*;
use tokio::time::Instant;

/// Layer that records each provider call with its timing and outcome.
#[derive(Debug, Clone, Default)]
pub struct LoggingLayer {
    log_response_text: bool,
}

impl LoggingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also emit the raw response text at `trace` level.
    ///
    /// Configuration payloads run to several kilobytes; leave this off
    /// outside debugging sessions.
    pub fn with_response_text(mut self, enabled: bool) -> Self {
        self.log_response_text = enabled;
        self
    }
}

impl<P: Provider> Layer<P> for LoggingLayer {
    type LayeredProvider = LoggingProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        LoggingProvider {
            inner,
            log_response_text: self.log_response_text,
        }
    }
}

/// Provider wrapped with logging
#[derive(Debug)]
pub struct LoggingProvider<P> {
    inner: P,
    log_response_text: bool,
}

/// Short name of the requested output mode
fn output_mode(format: Option<&ResponseFormat>) -> &'static str {
    match format {
        None | Some(ResponseFormat::Text) => "text",
        Some(ResponseFormat::JsonObject) => "json_object",
        Some(ResponseFormat::JsonSchema { .. }) => "json_schema",
    }
}

fn finish_reason_name(reason: &FinishReason) -> &str {
    match reason {
        FinishReason::Stop => "stop",
        FinishReason::Length => "length",
        FinishReason::ContentFilter => "content_filter",
        FinishReason::Other(other) => other,
    }
}

#[async_trait]
impl<P: Provider> LayeredProvider for LoggingProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_generate(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, BlueprintError> {
        let provider = self.inner.info().id.clone();
        let model = req.model.clone();

        tracing::debug!(
            provider = %provider,
            model = %model,
            messages = req.messages.len(),
            output_mode = output_mode(req.response_format.as_ref()),
            "sending generation request"
        );

        let start = Instant::now();
        let result = self.inner.generate(req).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => {
                let text = response.text().unwrap_or_default();
                tracing::debug!(
                    provider = %provider,
                    model = %response.model,
                    response_id = %response.id,
                    choices = response.choices.len(),
                    finish_reason = response
                        .choices
                        .first()
                        .map(|c| finish_reason_name(&c.finish_reason))
                        .unwrap_or("none"),
                    bytes = text.len(),
                    total_tokens = response.usage.total_tokens,
                    elapsed_ms,
                    "generation response received"
                );
                if self.log_response_text {
                    tracing::trace!(provider = %provider, text, "generation response text");
                }
            }
            Err(err) => {
                tracing::error!(
                    provider = %provider,
                    model = %model,
                    error = %err,
                    retryable = err.is_retryable(),
                    elapsed_ms,
                    "generation request failed"
                );
            }
        }

        result
    }
}

impl_layered_provider!(LoggingProvider);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoProvider;
    use std::time::Duration;

    #[tokio::test]
    async fn test_logging_is_transparent() {
        let provider = LoggingLayer::new()
            .with_response_text(true)
            .layer(EchoProvider::default());

        let response = provider
            .generate(GenerationRequest::new("m", vec![Message::user("ping")]))
            .await
            .unwrap();

        assert_eq!(response.text(), Some("ping"));
        assert_eq!(provider.info().id, "echo");
    }

    #[tokio::test]
    async fn test_logging_passes_errors_through() {
        let provider = LoggingLayer::new().layer(EchoProvider::default());

        let err = provider
            .generate(GenerationRequest::new("m", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, BlueprintError::InvalidRequest(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_logging_does_not_add_latency() {
        let provider = LoggingLayer::new().layer(EchoProvider::with_delay(Duration::from_secs(2)));

        let start = Instant::now();
        provider
            .generate(GenerationRequest::new("m", vec![Message::user("ping")]))
            .await
            .unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn test_output_mode_names() {
        assert_eq!(output_mode(None), "text");
        assert_eq!(output_mode(Some(&ResponseFormat::JsonObject)), "json_object");
        assert_eq!(finish_reason_name(&FinishReason::Length), "length");
        assert_eq!(
            finish_reason_name(&FinishReason::Other("RECITATION".to_string())),
            "RECITATION"
        );
    }
}
