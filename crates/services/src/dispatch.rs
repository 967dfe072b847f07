//! Contract between the session and per-type question renderers.
//!
//! Renderers live outside the engine. They get the tagged question, its
//! stored answer, and an [`AnswerSink`] scoped to that one question; they
//! never see the status or answer stores directly.

use std::collections::HashMap;

use exam_core::model::{
    AnswerRecord, CodingAnswer, DescriptiveAnswer, FillBlanksAnswer, MatchPairsAnswer,
    MultipleChoiceAnswer, Question, QuestionId, QuestionKind, QuestionStatus, SingleChoiceAnswer,
};

use crate::error::{DispatchError, SessionError};
use crate::sessions::{ExamSession, Navigation};

/// Handles one question kind.
pub trait QuestionRenderer {
    /// `existing` is the stored answer for pre-populating the widget.
    fn render(
        &self,
        question: &Question,
        existing: Option<AnswerRecord>,
        sink: &mut AnswerSink<'_>,
    ) -> Result<(), SessionError>;
}

/// Narrow callback interface handed to a renderer.
///
/// Writes always target the question the sink was created for.
pub struct AnswerSink<'a> {
    session: &'a mut ExamSession,
    question: QuestionId,
}

impl<'a> AnswerSink<'a> {
    fn new(session: &'a mut ExamSession, question: QuestionId) -> Self {
        Self { session, question }
    }

    #[must_use]
    pub fn question_id(&self) -> QuestionId {
        self.question
    }

    #[must_use]
    pub fn status(&self) -> Option<QuestionStatus> {
        self.session.status(self.question)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_single_choice(&mut self, answer: SingleChoiceAnswer) -> Result<(), SessionError> {
        self.session.set_single_choice(self.question, answer)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_multiple_choice(&mut self, answer: MultipleChoiceAnswer) -> Result<(), SessionError> {
        self.session.set_multiple_choice(self.question, answer)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_match_pairs(&mut self, answer: MatchPairsAnswer) -> Result<(), SessionError> {
        self.session.set_match_pairs(self.question, answer)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_fill_blanks(&mut self, answer: FillBlanksAnswer) -> Result<(), SessionError> {
        self.session.set_fill_blanks(self.question, answer)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_descriptive(&mut self, answer: DescriptiveAnswer) -> Result<(), SessionError> {
        self.session.set_descriptive(self.question, answer)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session setter.
    pub fn set_coding(&mut self, answer: CodingAnswer, has_changed: bool) -> Result<(), SessionError> {
        self.session.set_coding(self.question, answer, has_changed)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn mark_for_review(&mut self) -> Result<(), SessionError> {
        self.session.mark_for_review(self.question)
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn next(&mut self) -> Result<Navigation, SessionError> {
        self.session.next()
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn previous(&mut self) -> Result<Navigation, SessionError> {
        self.session.previous()
    }

    /// # Errors
    ///
    /// Propagates `SessionError` from the session.
    pub fn mark_and_next(&mut self) -> Result<Navigation, SessionError> {
        self.session.mark_and_next()
    }
}

/// Question kind → renderer table.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<QuestionKind, Box<dyn QuestionRenderer>>,
}

impl RendererRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: QuestionKind,
        renderer: impl QuestionRenderer + 'static,
    ) -> Option<Box<dyn QuestionRenderer>> {
        self.renderers.insert(kind, Box::new(renderer))
    }

    #[must_use]
    pub fn with(mut self, kind: QuestionKind, renderer: impl QuestionRenderer + 'static) -> Self {
        self.register(kind, renderer);
        self
    }

    #[must_use]
    pub fn handles(&self, kind: QuestionKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Kinds without a renderer, in declaration order.
    #[must_use]
    pub fn missing_kinds(&self) -> Vec<QuestionKind> {
        QuestionKind::ALL
            .into_iter()
            .filter(|kind| !self.handles(*kind))
            .collect()
    }

    /// Render the question under the session cursor.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::NoRenderer` if the kind has no renderer, or
    /// the `SessionError` the renderer returned.
    pub fn render_current(&self, session: &mut ExamSession) -> Result<(), DispatchError> {
        let id = session.cursor().question_id;
        self.render(session, id)
    }

    /// Render a specific question.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::Session` with `InvalidQuestionId` for an
    /// unknown id, `DispatchError::NoRenderer` if the kind has no renderer,
    /// or the `SessionError` the renderer returned.
    pub fn render(&self, session: &mut ExamSession, id: QuestionId) -> Result<(), DispatchError> {
        let Some(question) = session.question(id).cloned() else {
            let err = SessionError::InvalidQuestionId(id);
            session.reject("render", &err);
            return Err(err.into());
        };
        let Some(renderer) = self.renderers.get(&question.kind()) else {
            let err = DispatchError::NoRenderer(question.kind());
            session.reject("render", &err);
            return Err(err);
        };

        let existing = session.answer(id);
        let mut sink = AnswerSink::new(session, id);
        renderer.render(&question, existing, &mut sink)?;
        Ok(())
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.renderers.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("RendererRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
