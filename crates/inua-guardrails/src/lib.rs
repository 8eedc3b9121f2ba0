//! # inua-guardrails
//!
//! Safety gates that run before any technique selection: the two-stage
//! crisis classifier (authoritative keyword pass, then a model-backed
//! fallback), prompt-injection sanitization of user text, and the
//! emergency override payload built when a crisis is detected.

#![deny(unsafe_code)]

pub mod classifier;
pub mod emergency;
pub mod keywords;
pub mod sanitize;

pub use classifier::CrisisClassifier;
pub use emergency::{build_emergency_override, emergency_number};
pub use keywords::{CrisisMatcher, KeywordMatcher};
pub use sanitize::TextSanitizer;
