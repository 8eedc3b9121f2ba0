//! Settings errors.

use thiserror::Error;

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file contained invalid JSON.
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let err: SettingsError = std::io::Error::other("boom").into();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SettingsError = parse_err.into();
        assert!(err.to_string().contains("parse"));
    }
}
