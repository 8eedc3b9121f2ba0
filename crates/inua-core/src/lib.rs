//! # inua-core
//!
//! Foundation types for the Inua breathing coach: technique records and
//! their context rules, user profiles, safety-normalized candidates,
//! crisis decisions, and the wire-format response types.

#![deny(unsafe_code)]

pub mod candidate;
pub mod crisis;
pub mod errors;
pub mod phases;
pub mod profile;
pub mod response;
pub mod technique;

pub use candidate::{CandidateTechnique, EffectiveContext};
pub use crisis::{CrisisCategory, CrisisDecision, DetectionMethod};
pub use errors::ProfileError;
pub use phases::{BreathingPhases, UiTexts};
pub use profile::{TimePeriod, UserProfile};
pub use response::{
    AgentResponse, ButtonAction, EmergencyButton, EmergencyOverride, TechniquePayload,
};
pub use technique::{AgentConfig, ContextRules, PregnancyLogic, Technique, TimeOfDay};
