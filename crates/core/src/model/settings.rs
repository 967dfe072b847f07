use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("tick interval must be between 10 and 60000 ms, got {0}")]
    InvalidTickInterval(u64),
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Configuration of one exam session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    tick_interval_ms: u64,
    time_limit_minutes: Option<i64>,
    strict_resume: bool,
}

impl SessionSettings {
    pub const MIN_TICK_INTERVAL_MS: u64 = 10;
    pub const MAX_TICK_INTERVAL_MS: u64 = 60_000;

    /// Settings for a regular proctored session:
    /// - one tick per second
    /// - time limit taken from the sections
    /// - an unknown resume question falls back to the first question
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tick_interval_ms: 1_000,
            time_limit_minutes: None,
            strict_resume: false,
        }
    }

    /// Creates custom session settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidTickInterval` if the interval is outside
    /// `10..=60000` ms.
    pub fn new(
        tick_interval_ms: u64,
        time_limit_minutes: Option<i64>,
        strict_resume: bool,
    ) -> Result<Self, SettingsError> {
        if !(Self::MIN_TICK_INTERVAL_MS..=Self::MAX_TICK_INTERVAL_MS).contains(&tick_interval_ms) {
            return Err(SettingsError::InvalidTickInterval(tick_interval_ms));
        }

        Ok(Self {
            tick_interval_ms,
            time_limit_minutes,
            strict_resume,
        })
    }

    #[must_use]
    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Explicit limit overriding the sum of section limits.
    #[must_use]
    pub fn time_limit_minutes(&self) -> Option<i64> {
        self.time_limit_minutes
    }

    #[must_use]
    pub fn strict_resume(&self) -> bool {
        self.strict_resume
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::standard()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
