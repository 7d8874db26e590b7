//! Runtime layer.
//!
//! Sits between the goal-level API and the provider interface:
//! - formatting a goal into a provider-neutral generation request
//! - selecting the JSON output strategy for the provider
//! - decoding (and optionally re-validating) the response

pub mod decoder;
pub mod designer;

pub use decoder::decode_configuration;
pub use designer::{AgentDesigner, AgentDesignerBuilder};
