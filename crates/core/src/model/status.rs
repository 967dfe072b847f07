use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StatusError {
    #[error("invalid question status code: {0}")]
    InvalidCode(u8),
}

//
// ─── QUESTION STATUS ───────────────────────────────────────────────────────────
//

/// Progress marker of one question.
///
/// The four states are mutually exclusive. The numeric codes (0, 1, 2, 4)
/// are an external encoding only; they are never combined.
///
/// Transition rules live in the session's status store:
/// - `Attempted` is never downgraded by viewing.
/// - `MarkedForReview` overwrites anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Never left after being displayed, or never displayed at all.
    #[default]
    NotViewed,
    /// Has a non-empty answer.
    Attempted,
    /// Displayed and left without an answer.
    Viewed,
    /// Explicitly flagged by the candidate.
    MarkedForReview,
}

impl QuestionStatus {
    /// Parses the numeric status code used by external collaborators.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidCode` for anything other than 0, 1, 2 or 4.
    pub fn from_code(code: u8) -> Result<Self, StatusError> {
        match code {
            0 => Ok(Self::NotViewed),
            1 => Ok(Self::Attempted),
            2 => Ok(Self::Viewed),
            4 => Ok(Self::MarkedForReview),
            _ => Err(StatusError::InvalidCode(code)),
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            QuestionStatus::NotViewed => 0,
            QuestionStatus::Attempted => 1,
            QuestionStatus::Viewed => 2,
            QuestionStatus::MarkedForReview => 4,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
