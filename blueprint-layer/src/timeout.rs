//! Timeout layer for provider operations.

use async_trait::async_trait;
use blueprint_core::config::DEFAULT_TIMEOUT;
use blueprint_core::error::BlueprintError;
use blueprint_core::impl_layered_provider;
use blueprint_core::layer::{Layer, LayeredProvider};
use blueprint_core::provider::Provider;
use blueprint_core::types::*;
use std::time::Duration;

/// Timeout layer configuration
#[derive(Debug, Clone)]
pub struct TimeoutLayer {
    timeout: Duration,
}

impl TimeoutLayer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TimeoutLayer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl<P: Provider> Layer<P> for TimeoutLayer {
    type LayeredProvider = TimeoutProvider<P>;

    fn layer(&self, inner: P) -> Self::LayeredProvider {
        TimeoutProvider {
            inner,
            timeout: self.timeout,
        }
    }
}

/// Provider wrapped with a deadline
#[derive(Debug)]
pub struct TimeoutProvider<P> {
    inner: P,
    timeout: Duration,
}

#[async_trait]
impl<P: Provider> LayeredProvider for TimeoutProvider<P> {
    type Inner = P;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_generate(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponse, BlueprintError> {
        match tokio::time::timeout(self.timeout, self.inner.generate(req)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "provider call timed out");
                Err(BlueprintError::timeout(format!(
                    "no response within {:?}",
                    self.timeout
                )))
            }
        }
    }
}

impl_layered_provider!(TimeoutProvider);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoProvider;
    use tokio::time::Instant;

    fn request() -> GenerationRequest {
        GenerationRequest::new("m", vec![Message::user("ping")])
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_call_times_out() {
        let provider = TimeoutLayer::new(Duration::from_secs(5))
            .layer(EchoProvider::with_delay(Duration::from_secs(30)));

        let start = Instant::now();
        let err = provider.generate(request()).await.unwrap_err();

        assert!(matches!(err, BlueprintError::Timeout(_)));
        assert!(err.is_retryable());
        assert_eq!(start.elapsed(), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_call_passes() {
        let provider = TimeoutLayer::new(Duration::from_secs(5))
            .layer(EchoProvider::with_delay(Duration::from_secs(1)));

        let response = provider.generate(request()).await.unwrap();
        assert_eq!(response.text(), Some("ping"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stacks_with_logging() {
        let provider = crate::LoggingLayer::new().layer(
            TimeoutLayer::new(Duration::from_millis(10))
                .layer(EchoProvider::with_delay(Duration::from_secs(1))),
        );

        let err = provider.generate(request()).await.unwrap_err();
        assert!(matches!(err, BlueprintError::Timeout(_)));
    }
}
