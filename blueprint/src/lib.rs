//! # Blueprint
//!
//! Turn a free-text goal into a structured AI agent configuration.
//!
//! Blueprint sends one goal to a generative model together with a fixed
//! design instruction and an output schema, decodes the answer into a typed
//! [`AgentConfiguration`], and offers a headless [`GenerationSession`] that
//! plays a phased progress animation while the call is outstanding.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! blueprint = { version = "0.1", features = ["gemini", "layers"] }
//! ```
//!
//! ```ignore
//! use blueprint::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let provider = GeminiProvider::from_config(&config)?;
//!
//! let designer = AgentDesigner::builder(provider)
//!     .layer(TimeoutLayer::new(config.timeout()))
//!     .layer(LoggingLayer::new())
//!     .config(&config)
//!     .finish();
//!
//! let session = GenerationSession::new(designer);
//! let agent = session.generate("Monitor social media for brand mentions").await?;
//! println!("{}", ConfigurationSection::Deployment.render(&agent)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: `gemini` and `layers`
//! - `gemini`: Google Gemini provider
//! - `openai`: OpenAI-compatible provider (OpenAI, DeepSeek)
//! - `providers`: All available providers
//! - `layers`: Built-in layers (logging, timeout)
//! - `schema`: JSON Schema export of the configuration model via schemars
//! - `full`: All features enabled

// Re-export core types and traits
pub use blueprint_core::*;

// Re-export providers under `provider` module
#[cfg(feature = "blueprint-provider")]
pub mod provider {
    //! Generation provider implementations.
    pub use blueprint_provider::*;
}

// Re-export layers under `layers` module
#[cfg(feature = "blueprint-layer")]
pub mod layers {
    //! Built-in provider layers.
    pub use blueprint_layer::*;
}

// Re-export schemars when schema feature is enabled
#[cfg(feature = "schema")]
pub mod schemars {
    pub use ::schemars::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use blueprint::prelude::*;
    //! ```

    pub use crate::{
        AgentConfiguration, AgentDesigner, BlueprintError, Config, ConfigurationSection,
        GenerationError, GenerationSession, Layer, Progress, Provider, Result,
    };

    #[cfg(feature = "blueprint-provider")]
    pub use crate::provider::*;

    #[cfg(feature = "blueprint-layer")]
    pub use crate::layers::*;
}
