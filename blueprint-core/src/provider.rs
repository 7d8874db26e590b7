//! Provider trait.

use crate::error::BlueprintError;
use crate::types::*;
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Core provider trait for generation services.
///
/// A provider performs exactly one outbound call per `generate` invocation.
/// Prompt assembly, schema selection and decoding live in
/// [`AgentDesigner`](crate::AgentDesigner).
#[async_trait]
pub trait Provider: Send + Sync + Debug + 'static {
    /// Get provider information
    fn info(&self) -> Arc<ProviderInfo>;

    /// Issue a single, non-streaming generation request
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError>;
}

#[async_trait]
impl<P: Provider + ?Sized> Provider for Arc<P> {
    fn info(&self) -> Arc<ProviderInfo> {
        (**self).info()
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponse, BlueprintError> {
        (**self).generate(req).await
    }
}
