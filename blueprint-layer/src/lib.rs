//! # Blueprint Layers
//!
//! Built-in layers for Blueprint providers.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs every provider call with timing information
//! - `TimeoutLayer`: Fails a call that outlives its deadline
//!
//! A configuration is generated with exactly one provider call per user
//! action, so there is no retry layer.
//!
//! ## Usage
//!
//! ```ignore
//! use blueprint_core::AgentDesigner;
//! use blueprint_layer::{LoggingLayer, TimeoutLayer};
//!
//! let designer = AgentDesigner::builder(provider)
//!     .layer(TimeoutLayer::new(Duration::from_secs(60)))
//!     .layer(LoggingLayer::new())
//!     .finish();
//! ```

pub mod logging;
pub mod timeout;

#[cfg(test)]
mod testing;

// Re-exports
pub use logging::LoggingLayer;
pub use timeout::TimeoutLayer;
