use serde::{Deserialize, Serialize};

use crate::model::ids::SectionId;

/// A section of the assessment as supplied by the caller.
///
/// The position of a section in the list handed to the session is what
/// orders it; `totals` and `time_limit_minutes` are authored metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    name: String,
    total_questions: u32,
    total_marks: u32,
    time_limit_minutes: i64,
}

impl Section {
    #[must_use]
    pub fn new(
        id: SectionId,
        name: impl Into<String>,
        total_questions: u32,
        total_marks: u32,
        time_limit_minutes: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            total_questions,
            total_marks,
            time_limit_minutes,
        }
    }

    #[must_use]
    pub fn id(&self) -> SectionId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    /// Authored time limit in minutes. May be zero or negative in bad data;
    /// the timer clamps such limits to zero.
    #[must_use]
    pub fn time_limit_minutes(&self) -> i64 {
        self.time_limit_minutes
    }
}
