//! Interactive session state.
//!
//! A session owns the generation trigger, plays the cosmetic phase
//! animation while the provider call is outstanding, and keeps the latest
//! configuration or error for display.

mod controller;
mod phase;

pub use controller::GenerationSession;
pub use phase::{Phase, PhaseTracker, Progress, PHASES};
