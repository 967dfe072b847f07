use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::answer::AnswerKind;
use crate::model::ids::{QuestionId, SectionId};

//
// ─── QUESTION KIND ─────────────────────────────────────────────────────────────
//

/// Type tag of a question. Decides which renderer handles it and which
/// answer shape it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One option out of a list.
    SingleChoice,
    /// Any subset of a list of options.
    MultipleChoice,
    /// Two fixed options; answered like a single choice.
    TrueFalse,
    /// Left items paired with right items.
    MatchPairs,
    /// Text typed into numbered blanks.
    FillBlanks,
    /// Free text.
    Descriptive,
    /// Source files edited in a code editor.
    Coding,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 7] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultipleChoice,
        QuestionKind::TrueFalse,
        QuestionKind::MatchPairs,
        QuestionKind::FillBlanks,
        QuestionKind::Descriptive,
        QuestionKind::Coding,
    ];

    /// Answer shape stored for questions of this kind.
    #[must_use]
    pub fn answer_kind(self) -> AnswerKind {
        match self {
            QuestionKind::SingleChoice | QuestionKind::TrueFalse => AnswerKind::SingleChoice,
            QuestionKind::MultipleChoice => AnswerKind::MultipleChoice,
            QuestionKind::MatchPairs => AnswerKind::MatchPairs,
            QuestionKind::FillBlanks => AnswerKind::FillBlanks,
            QuestionKind::Descriptive => AnswerKind::Descriptive,
            QuestionKind::Coding => AnswerKind::Coding,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::TrueFalse => "true_false",
            QuestionKind::MatchPairs => "match_pairs",
            QuestionKind::FillBlanks => "fill_blanks",
            QuestionKind::Descriptive => "descriptive",
            QuestionKind::Coding => "coding",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A question as supplied by the caller at session start.
///
/// Immutable for the whole session. The engine only needs the id, the owning
/// section and the kind; marks and topics are carried for collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    section_id: SectionId,
    kind: QuestionKind,
    marks: u32,
    #[serde(default)]
    topics: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        section_id: SectionId,
        kind: QuestionKind,
        marks: u32,
        topics: Vec<String>,
    ) -> Self {
        Self {
            id,
            section_id,
            kind,
            marks,
            topics,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn marks(&self) -> u32 {
        self.marks
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
