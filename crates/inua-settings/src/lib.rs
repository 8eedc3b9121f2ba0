//! # inua-settings
//!
//! Layered configuration: compiled defaults, deep-merged user settings
//! file, and environment variable overrides with strict parsing.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::{ApiSettings, CatalogSettings, InuaSettings, SafetySettings, ServerSettings};
