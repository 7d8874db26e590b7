use async_trait::async_trait;
use blueprint_core::error::BlueprintError;
use blueprint_core::provider::Provider;
use blueprint_core::types::*;
use std::sync::Arc;
use std::time::Duration;

/// Replies with the last message's text after an optional delay.
#[derive(Debug, Default)]
pub(crate) struct EchoProvider {
    delay: Duration,
}

impl EchoProvider {
    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Provider for EchoProvider {
    fn info(&self) -> Arc<ProviderInfo> {
        Arc::new(ProviderInfo {
            id: "echo".to_string(),
            name: "Echo".to_string(),
        })
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError> {
        tokio::time::sleep(self.delay).await;

        let text = req
            .messages
            .last()
            .map(|m| m.content.clone())
            .ok_or_else(|| BlueprintError::invalid_request("no messages"))?;

        Ok(GenerationResponse {
            id: "echo-1".to_string(),
            model: req.model,
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(text),
                finish_reason: FinishReason::Stop,
            }],
            usage: Usage::default(),
            created: None,
        })
    }
}
