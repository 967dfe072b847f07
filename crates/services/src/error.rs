//! Shared error types for the services crate.

use thiserror::Error;

use exam_core::model::{AnswerKind, QuestionId, QuestionKind, SectionId};

/// Errors emitted by `ExamSession`.
///
/// Construction errors reject the session. Every other variant is returned by
/// a mutation that was turned into a no-op: the session state is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions supplied for session")]
    Empty,
    #[error("question {0} appears more than once")]
    DuplicateQuestion(QuestionId),
    #[error("section {0} appears more than once")]
    DuplicateSection(SectionId),
    #[error("question {question} references unknown section {section}")]
    UnknownSection {
        question: QuestionId,
        section: SectionId,
    },
    #[error("initial question {0} is not part of this session")]
    InvalidInitialQuestion(QuestionId),
    #[error("question {0} is not part of this session")]
    InvalidQuestionId(QuestionId),
    #[error("section {0} has no questions to navigate to")]
    InconsistentSectionId(SectionId),
    #[error("question {question} ({kind}) expects a {expected} answer, got {actual}")]
    AnswerKindMismatch {
        question: QuestionId,
        kind: QuestionKind,
        expected: AnswerKind,
        actual: AnswerKind,
    },
}

/// Errors emitted by `CountdownTimer`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerError {
    #[error("countdown needs a running tokio runtime to schedule its tick")]
    NoRuntime,
    #[error("tick period must be non-zero")]
    InvalidPeriod,
    #[error("ticks are scheduled by the timer task; manual ticks need TickMode::Manual")]
    NotManual,
}

/// Errors emitted by `RendererRegistry`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DispatchError {
    #[error("no renderer registered for {0} questions")]
    NoRenderer(QuestionKind),
    #[error(transparent)]
    Session(#[from] SessionError),
}
