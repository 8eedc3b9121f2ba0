//! Profile validation errors.

use thiserror::Error;

/// Boundary validation failure on a user profile.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    /// Trimester outside 1–3.
    #[error("trimester must be 1-3, got {0}")]
    InvalidTrimester(u8),

    /// Country code is not two ASCII letters.
    #[error("country code must be two letters, got {0:?}")]
    InvalidCountryCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_value() {
        let err = ProfileError::InvalidTrimester(7);
        assert!(err.to_string().contains('7'));

        let err = ProfileError::InvalidCountryCode("TUR".into());
        assert!(err.to_string().contains("TUR"));
    }
}
