//! Strategy layer for provider-specific behaviors.
//!
//! Handles differences between providers in how structured JSON output is
//! requested (native response schema vs JSON object mode).

pub mod json_output;

pub use json_output::{detect_json_strategy, JsonModeStrategy, JsonOutputStrategy, JsonSchemaStrategy};
