//! # Blueprint Core
//!
//! Core abstractions and runtime for turning a natural-language goal into a
//! structured agent configuration.
//!
//! This crate provides the provider and layer traits, the output schema and
//! typed configuration model, the designer that issues the single
//! generation call, and the session that animates and reveals its result.

pub mod agent;
pub mod config;
pub mod error;
pub mod layer;
pub mod provider;
pub mod runtime;
pub mod schema;
pub mod session;
pub mod strategy;
pub mod types;

#[cfg(test)]
mod testing;

// Re-exports
pub use agent::{agent_configuration_schema, AgentConfiguration, ConfigurationSection};
pub use config::Config;
pub use error::{BlueprintError, GenerationError};
pub use layer::{Layer, LayeredProvider};
pub use provider::Provider;
pub use runtime::{AgentDesigner, AgentDesignerBuilder};
pub use schema::{SchemaDialect, SchemaNode, SchemaViolation};
pub use session::{GenerationSession, Phase, PhaseTracker, Progress};
pub use strategy::{JsonModeStrategy, JsonOutputStrategy, JsonSchemaStrategy};
pub use types::*;

/// Result type alias for provider operations
pub type Result<T> = std::result::Result<T, BlueprintError>;
