//! User profile and the time period derived from it.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

/// Hour (inclusive) at which night starts.
const NIGHT_START_HOUR: u32 = 21;
/// Hour (exclusive) at which night ends.
const NIGHT_END_HOUR: u32 = 6;

/// Hour assumed when `current_time` cannot be parsed.
const FALLBACK_HOUR: u32 = 12;

/// Day/night bucket used by catalog time rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    /// 06:00–20:59.
    Day,
    /// 21:00–05:59.
    Night,
}

impl std::fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Night => write!(f, "night"),
        }
    }
}

impl TimePeriod {
    /// Bucket for a given local hour (0–23).
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        if hour >= NIGHT_START_HOUR || hour < NIGHT_END_HOUR {
            Self::Night
        } else {
            Self::Day
        }
    }
}

/// The caller-supplied user context for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Whether the user is pregnant. Drives the hold-stripping rules.
    pub is_pregnant: bool,
    /// Trimester 1–3, when pregnant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trimester: Option<u8>,
    /// Local wall-clock time as `"HH:MM"`.
    pub current_time: String,
    /// Two-letter country code. Used for emergency number lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

impl UserProfile {
    /// Local hour parsed from `current_time`, falling back to noon when
    /// the string is unparseable.
    #[must_use]
    pub fn hour(&self) -> u32 {
        NaiveTime::parse_from_str(&self.current_time, "%H:%M")
            .map_or(FALLBACK_HOUR, |t| chrono::Timelike::hour(&t))
    }

    /// The day/night bucket for this profile.
    #[must_use]
    pub fn time_period(&self) -> TimePeriod {
        TimePeriod::from_hour(self.hour())
    }

    /// Check boundary constraints on the profile.
    ///
    /// Trimester must be 1–3 when present; a country code must be two
    /// ASCII letters when present.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(t) = self.trimester {
            if !(1..=3).contains(&t) {
                return Err(ProfileError::InvalidTrimester(t));
            }
        }
        if let Some(code) = &self.country_code {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ProfileError::InvalidCountryCode(code.clone()));
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
