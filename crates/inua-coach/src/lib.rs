//! # inua-coach
//!
//! The selection pipeline around the model call: prompt construction
//! over an already-safe candidate set, validation and repair of the
//! model's structured reply, deterministic resolution back onto the
//! candidates, and the instruction synthesizer that renders timing text
//! from data instead of trusting model narration.

#![deny(unsafe_code)]

pub mod agent;
pub mod compliance;
pub mod orchestrator;
pub mod prompt;
pub mod synthesizer;
pub mod validate;

pub use agent::BreathingAgent;
pub use compliance::ComplianceFacts;
pub use orchestrator::{SelectionOptions, SelectionOrchestrator};
pub use synthesizer::render_instructions;
pub use validate::SelectionResult;
