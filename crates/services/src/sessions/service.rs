use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

use exam_core::Clock;
use exam_core::model::{
    AnswerKind, AnswerRecord, CodingAnswer, DescriptiveAnswer, FillBlanksAnswer,
    MatchPairsAnswer, MultipleChoiceAnswer, Question, QuestionId, QuestionStatus, Section,
    SectionId, SessionId, SessionSettings, SessionStats, SingleChoiceAnswer,
};

use super::answers::AnswerStore;
use super::navigation::{SectionLayout, Step};
use super::progress;
use super::status::{StatusChange, StatusStore};
use super::submission::Submission;
use crate::error::SessionError;

//
// ─── CURSOR & NAVIGATION ───────────────────────────────────────────────────────
//

/// What is displayed now. `section_id` is always the section of `question_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCursor {
    pub question_id: QuestionId,
    pub section_id: SectionId,
}

/// Outcome of a navigation request that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: QuestionId, to: QuestionId },
    /// Nothing to move to (first/last question, or already there).
    Unchanged,
}

impl Navigation {
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one timed assessment.
///
/// Owns the question/section lists, the status and answer stores and the
/// cursor. Every operation is synchronous; callers on a multi-threaded host
/// must put the session behind a single mutex or actor.
///
/// Mutations never panic. A rejected mutation returns `Err` and leaves the
/// session exactly as it was.
pub struct ExamSession {
    id: SessionId,
    settings: SessionSettings,
    questions: Vec<Question>,
    question_index: HashMap<QuestionId, usize>,
    sections: Vec<Section>,
    layout: SectionLayout,
    statuses: StatusStore,
    answers: AnswerStore,
    cursor: SessionCursor,
    started_at: DateTime<Utc>,
}

impl ExamSession {
    /// Start a session over the given questions and sections.
    ///
    /// `initial` resumes at a specific question (deep link). An unknown
    /// `initial` falls back to the first question unless
    /// `settings.strict_resume()` is set.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if there are no questions.
    /// Returns `SessionError::DuplicateQuestion`, `SessionError::DuplicateSection`
    /// or `SessionError::UnknownSection` for malformed lists.
    /// Returns `SessionError::InvalidInitialQuestion` for an unknown `initial`
    /// under strict resume.
    pub fn start(
        questions: Vec<Question>,
        sections: Vec<Section>,
        initial: Option<QuestionId>,
        settings: SessionSettings,
        clock: &Clock,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let layout = SectionLayout::build(&sections, &questions)?;
        let first = layout.first().ok_or(SessionError::Empty)?;
        let id = SessionId::generate();

        let start_at = match initial {
            Some(question) if layout.contains(question) => question,
            Some(question) if settings.strict_resume() => {
                return Err(SessionError::InvalidInitialQuestion(question));
            }
            Some(question) => {
                warn!(
                    session = %id,
                    requested = %question,
                    fallback = %first,
                    "unknown resume question, starting at first question"
                );
                first
            }
            None => first,
        };
        let section_id = layout
            .section_of(start_at)
            .ok_or(SessionError::InvalidInitialQuestion(start_at))?;

        let question_index = questions
            .iter()
            .enumerate()
            .map(|(index, question)| (question.id(), index))
            .collect();
        let statuses = StatusStore::new(questions.iter().map(Question::id));

        info!(
            session = %id,
            questions = questions.len(),
            sections = sections.len(),
            start = %start_at,
            "exam session started"
        );

        Ok(Self {
            id,
            settings,
            questions,
            question_index,
            sections,
            layout,
            statuses,
            answers: AnswerStore::default(),
            cursor: SessionCursor {
                question_id: start_at,
                section_id,
            },
            started_at: clock.now(),
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.question_index
            .get(&id)
            .and_then(|index| self.questions.get(*index))
    }

    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|section| section.id() == id)
    }

    /// Question ids of a section in navigation order.
    #[must_use]
    pub fn questions_in_section(&self, id: SectionId) -> Option<&[QuestionId]> {
        self.layout.questions_in(id)
    }

    #[must_use]
    pub fn cursor(&self) -> SessionCursor {
        self.cursor
    }

    /// The question under the cursor.
    ///
    /// Always `Some` for a started session; the option only guards the
    /// lookup.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.question(self.cursor.question_id)
    }

    #[must_use]
    pub fn current_section(&self) -> Option<&Section> {
        self.section(self.cursor.section_id)
    }

    #[must_use]
    pub fn status(&self, id: QuestionId) -> Option<QuestionStatus> {
        self.statuses.get(id)
    }

    /// Every status in navigation order.
    #[must_use]
    pub fn statuses(&self) -> Vec<(QuestionId, QuestionStatus)> {
        self.layout
            .ordered()
            .filter_map(|id| self.statuses.get(id).map(|status| (id, status)))
            .collect()
    }

    #[must_use]
    pub fn status_store(&self) -> &StatusStore {
        &self.statuses
    }

    /// Read access to every per-type answer map.
    #[must_use]
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Stored answer of a question, used to pre-populate its renderer.
    #[must_use]
    pub fn answer(&self, id: QuestionId) -> Option<AnswerRecord> {
        let kind = self.question(id)?.kind().answer_kind();
        self.answers.get(id, kind)
    }

    /// Progress counts, recomputed from the statuses on every call.
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        progress::overall(&self.statuses)
    }

    #[must_use]
    pub fn section_stats(&self, id: SectionId) -> Option<SessionStats> {
        self.layout
            .questions_in(id)
            .map(|ids| progress::subset(&self.statuses, ids))
    }

    /// Session time limit: the explicit override, else the sum of the
    /// sections' limits.
    #[must_use]
    pub fn time_limit_minutes(&self) -> i64 {
        self.settings.time_limit_minutes().unwrap_or_else(|| {
            self.sections
                .iter()
                .map(Section::time_limit_minutes)
                .fold(0_i64, i64::saturating_add)
        })
    }

    // ─── Status transitions ─────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` if `id` is not in the session.
    pub fn mark_attempted(&mut self, id: QuestionId) -> Result<(), SessionError> {
        let result = self.statuses.mark_attempted(id);
        self.record("mark_attempted", result).map(|_| ())
    }

    /// Sets `Viewed` unless the question is already `Attempted`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` if `id` is not in the session.
    pub fn mark_viewed(&mut self, id: QuestionId) -> Result<(), SessionError> {
        let result = self.statuses.mark_viewed(id);
        self.record("mark_viewed", result).map(|_| ())
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` if `id` is not in the session.
    pub fn mark_for_review(&mut self, id: QuestionId) -> Result<(), SessionError> {
        let result = self.statuses.mark_for_review(id);
        self.record("mark_for_review", result).map(|_| ())
    }

    fn record(
        &self,
        op: &'static str,
        result: Result<StatusChange, SessionError>,
    ) -> Result<StatusChange, SessionError> {
        match &result {
            Ok(change) if change.changed() => debug!(
                session = %self.id,
                question = %change.question_id,
                from = ?change.from,
                to = ?change.to,
                op,
                "status changed"
            ),
            Ok(_) => {}
            Err(err) => self.reject(op, err),
        }
        result
    }

    pub(crate) fn reject(&self, op: &'static str, err: &dyn std::fmt::Display) {
        warn!(session = %self.id, op, error = %err, "operation rejected");
    }

    // ─── Answers ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` or
    /// `SessionError::AnswerKindMismatch`; nothing is stored in either case.
    pub fn set_single_choice(
        &mut self,
        id: QuestionId,
        answer: SingleChoiceAnswer,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::SingleChoice(answer), None)
    }

    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_multiple_choice(
        &mut self,
        id: QuestionId,
        answer: MultipleChoiceAnswer,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::MultipleChoice(answer), None)
    }

    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_match_pairs(
        &mut self,
        id: QuestionId,
        answer: MatchPairsAnswer,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::MatchPairs(answer), None)
    }

    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_fill_blanks(
        &mut self,
        id: QuestionId,
        answer: FillBlanksAnswer,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::FillBlanks(answer), None)
    }

    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_descriptive(
        &mut self,
        id: QuestionId,
        answer: DescriptiveAnswer,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::Descriptive(answer), None)
    }

    /// Store editor state. `has_changed` decides between `Attempted` and
    /// `Viewed`, since the editor always holds at least boilerplate.
    ///
    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_coding(
        &mut self,
        id: QuestionId,
        answer: CodingAnswer,
        has_changed: bool,
    ) -> Result<(), SessionError> {
        self.store_answer(id, AnswerRecord::Coding(answer), Some(has_changed))
    }

    /// Store any answer shape.
    ///
    /// A coding record counts as changed only when it differs from a coding
    /// answer stored earlier; the first write is taken as the seeded
    /// boilerplate. Editors that know better should call
    /// [`ExamSession::set_coding`].
    ///
    /// # Errors
    ///
    /// See [`ExamSession::set_single_choice`].
    pub fn set_answer(&mut self, id: QuestionId, record: AnswerRecord) -> Result<(), SessionError> {
        let has_changed = match &record {
            AnswerRecord::Coding(code) => Some(
                self.answers
                    .coding()
                    .get(&id)
                    .is_some_and(|previous| previous != code),
            ),
            _ => None,
        };
        self.store_answer(id, record, has_changed)
    }

    fn store_answer(
        &mut self,
        id: QuestionId,
        record: AnswerRecord,
        coding_changed: Option<bool>,
    ) -> Result<(), SessionError> {
        let Some(kind) = self.question(id).map(Question::kind) else {
            let err = SessionError::InvalidQuestionId(id);
            self.reject("set_answer", &err);
            return Err(err);
        };
        let expected = kind.answer_kind();
        if record.kind() != expected {
            let err = SessionError::AnswerKindMismatch {
                question: id,
                kind,
                expected,
                actual: record.kind(),
            };
            self.reject("set_answer", &err);
            return Err(err);
        }

        let attempted = coding_changed.unwrap_or_else(|| record.is_attempted());
        self.answers.put(id, record);
        debug!(session = %self.id, question = %id, %kind, attempted, "answer stored");

        if attempted {
            self.mark_attempted(id)
        } else if expected == AnswerKind::Coding {
            self.mark_viewed(id)
        } else {
            Ok(())
        }
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Next question in the section, else the first question of the next
    /// section, else no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InconsistentSectionId` if the next section has
    /// no questions; the cursor stays put.
    pub fn next(&mut self) -> Result<Navigation, SessionError> {
        let step = self.layout.next_of(self.cursor.question_id);
        self.follow("next", step)
    }

    /// Previous question in the section, else the last question of the
    /// previous section, else no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InconsistentSectionId` if the previous section
    /// has no questions; the cursor stays put.
    pub fn previous(&mut self) -> Result<Navigation, SessionError> {
        let step = self.layout.previous_of(self.cursor.question_id);
        self.follow("previous", step)
    }

    /// Flag the current question for review, then move on.
    ///
    /// The flag is kept even when there is nothing to move to.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` only if the cursor is broken.
    pub fn mark_and_next(&mut self) -> Result<Navigation, SessionError> {
        self.mark_for_review(self.cursor.question_id)?;
        match self.next() {
            Err(SessionError::InconsistentSectionId(_)) => Ok(Navigation::Unchanged),
            other => other,
        }
    }

    /// Move the cursor straight to `id` (question palette click).
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidQuestionId` if `id` is not in the session.
    pub fn jump_to(&mut self, id: QuestionId) -> Result<Navigation, SessionError> {
        if !self.layout.contains(id) {
            let err = SessionError::InvalidQuestionId(id);
            self.reject("jump_to", &err);
            return Err(err);
        }
        if id == self.cursor.question_id {
            return Ok(Navigation::Unchanged);
        }
        self.move_to(id)
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        matches!(self.layout.next_of(self.cursor.question_id), Some(Step::To(_)))
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        matches!(
            self.layout.previous_of(self.cursor.question_id),
            Some(Step::To(_))
        )
    }

    fn follow(&mut self, op: &'static str, step: Option<Step>) -> Result<Navigation, SessionError> {
        match step {
            Some(Step::To(to)) => self.move_to(to),
            Some(Step::Edge) => {
                debug!(session = %self.id, op, at = %self.cursor.question_id, "no question to move to");
                Ok(Navigation::Unchanged)
            }
            Some(Step::EmptySection(section)) => {
                let err = SessionError::InconsistentSectionId(section);
                self.reject(op, &err);
                Err(err)
            }
            None => {
                let err = SessionError::InvalidQuestionId(self.cursor.question_id);
                self.reject(op, &err);
                Err(err)
            }
        }
    }

    fn move_to(&mut self, to: QuestionId) -> Result<Navigation, SessionError> {
        let Some(section_id) = self.layout.section_of(to) else {
            let err = SessionError::InvalidQuestionId(to);
            self.reject("move", &err);
            return Err(err);
        };
        let from = self.cursor.question_id;
        let left = self.statuses.mark_left(from);
        self.record("leave", left)?;

        self.cursor = SessionCursor {
            question_id: to,
            section_id,
        };
        debug!(session = %self.id, %from, %to, section = %section_id, "cursor moved");
        Ok(Navigation::Moved { from, to })
    }

    // ─── Submission ─────────────────────────────────────────────────────────

    /// End the session and hand its final state to the submitter.
    #[must_use]
    pub fn submit(self, clock: &Clock) -> Submission {
        let stats = self.stats();
        let submitted_at = clock.now();
        info!(
            session = %self.id,
            attempted = stats.attempted,
            for_review = stats.for_review,
            total = stats.total,
            "exam session submitted"
        );
        Submission {
            session_id: self.id,
            started_at: self.started_at,
            submitted_at,
            statuses: self.statuses.iter().collect(),
            answers: self.answers.into_records(),
            stats,
        }
    }
}

impl fmt::Debug for ExamSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExamSession")
            .field("id", &self.id)
            .field("questions_len", &self.questions.len())
            .field("sections_len", &self.sections.len())
            .field("cursor", &self.cursor)
            .field("answers_len", &self.answers.len())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{QuestionKind, SourceFile};
    use exam_core::time::fixed_clock;

    fn question(id: u64, section: u64, kind: QuestionKind) -> Question {
        Question::new(
            QuestionId::new(id),
            SectionId::new(section),
            kind,
            2,
            vec!["topic".to_string()],
        )
    }

    fn section(id: u64, questions: u32) -> Section {
        Section::new(SectionId::new(id), format!("Section {id}"), questions, questions * 2, 30)
    }

    /// Section 1: q1 single, q2 multiple. Section 2: q3 descriptive, q4 coding.
    fn build_session() -> ExamSession {
        ExamSession::start(
            vec![
                question(1, 1, QuestionKind::SingleChoice),
                question(2, 1, QuestionKind::MultipleChoice),
                question(3, 2, QuestionKind::Descriptive),
                question(4, 2, QuestionKind::Coding),
            ],
            vec![section(1, 2), section(2, 2)],
            None,
            SessionSettings::standard(),
            &fixed_clock(),
        )
        .unwrap()
    }

    fn boilerplate() -> CodingAnswer {
        CodingAnswer {
            source_files: vec![SourceFile {
                id: "main".into(),
                name: "main.py".into(),
                contents: "def solve():\n    pass\n".into(),
            }],
            active_file_id: "main".into(),
            language: "python".into(),
        }
    }

    fn q(id: u64) -> QuestionId {
        QuestionId::new(id)
    }

    #[test]
    fn starts_at_first_question_with_everything_not_viewed() {
        let session = build_session();

        assert_eq!(
            session.cursor(),
            SessionCursor {
                question_id: q(1),
                section_id: SectionId::new(1)
            }
        );
        assert!(
            session
                .statuses()
                .iter()
                .all(|(_, status)| *status == QuestionStatus::NotViewed)
        );
        assert_eq!(session.stats().not_viewed, 4);
        assert_eq!(session.stats().total, 4);
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = ExamSession::start(
            Vec::new(),
            vec![section(1, 0)],
            None,
            SessionSettings::standard(),
            &fixed_clock(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn resume_starts_at_requested_question() {
        let session = ExamSession::start(
            vec![question(1, 1, QuestionKind::TrueFalse), question(2, 2, QuestionKind::TrueFalse)],
            vec![section(1, 1), section(2, 1)],
            Some(q(2)),
            SessionSettings::standard(),
            &fixed_clock(),
        )
        .unwrap();

        assert_eq!(session.cursor().question_id, q(2));
        assert_eq!(session.cursor().section_id, SectionId::new(2));
    }

    #[test]
    fn unknown_resume_question_falls_back_unless_strict() {
        let questions = vec![question(1, 1, QuestionKind::TrueFalse)];
        let sections = vec![section(1, 1)];

        let lenient = ExamSession::start(
            questions.clone(),
            sections.clone(),
            Some(q(42)),
            SessionSettings::standard(),
            &fixed_clock(),
        )
        .unwrap();
        assert_eq!(lenient.cursor().question_id, q(1));

        let strict = ExamSession::start(
            questions,
            sections,
            Some(q(42)),
            SessionSettings::new(1_000, None, true).unwrap(),
            &fixed_clock(),
        )
        .unwrap_err();
        assert_eq!(strict, SessionError::InvalidInitialQuestion(q(42)));
    }

    #[test]
    fn invalid_ids_are_no_ops() {
        let mut session = build_session();
        let before = session.statuses();

        assert_eq!(
            session.mark_attempted(q(99)),
            Err(SessionError::InvalidQuestionId(q(99)))
        );
        assert_eq!(
            session.mark_viewed(q(99)),
            Err(SessionError::InvalidQuestionId(q(99)))
        );
        assert_eq!(
            session.jump_to(q(99)),
            Err(SessionError::InvalidQuestionId(q(99)))
        );
        assert_eq!(
            session.set_descriptive(q(99), DescriptiveAnswer::new("x")),
            Err(SessionError::InvalidQuestionId(q(99)))
        );

        assert_eq!(session.statuses(), before);
        assert_eq!(session.cursor().question_id, q(1));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn answer_setters_mark_attempted_when_predicate_holds() {
        let mut session = build_session();

        session
            .set_single_choice(q(1), SingleChoiceAnswer::from_signed(-1))
            .unwrap();
        assert_eq!(session.status(q(1)), Some(QuestionStatus::NotViewed));

        session
            .set_single_choice(q(1), SingleChoiceAnswer::selected(0))
            .unwrap();
        assert_eq!(session.status(q(1)), Some(QuestionStatus::Attempted));

        session
            .set_multiple_choice(q(2), MultipleChoiceAnswer::default())
            .unwrap();
        assert_eq!(session.status(q(2)), Some(QuestionStatus::NotViewed));

        session
            .set_descriptive(q(3), DescriptiveAnswer::new("  because  "))
            .unwrap();
        assert_eq!(session.status(q(3)), Some(QuestionStatus::Attempted));
    }

    #[test]
    fn clearing_an_answer_keeps_attempted() {
        let mut session = build_session();
        session
            .set_multiple_choice(q(2), MultipleChoiceAnswer::new([1]))
            .unwrap();
        session
            .set_multiple_choice(q(2), MultipleChoiceAnswer::default())
            .unwrap();

        assert_eq!(session.status(q(2)), Some(QuestionStatus::Attempted));
        assert_eq!(
            session.answer(q(2)),
            Some(AnswerRecord::MultipleChoice(MultipleChoiceAnswer::default()))
        );
    }

    #[test]
    fn unchanged_code_only_reaches_viewed() {
        let mut session = build_session();

        session.set_coding(q(4), boilerplate(), false).unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Viewed));

        session.set_coding(q(4), boilerplate(), true).unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Attempted));

        session.set_coding(q(4), boilerplate(), false).unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Attempted));
    }

    #[test]
    fn changed_code_goes_straight_to_attempted() {
        let mut session = build_session();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::NotViewed));

        session.set_coding(q(4), boilerplate(), true).unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Attempted));
        assert_eq!(session.stats().attempted, 1);
        assert!(session.stats().is_consistent());
    }

    #[test]
    fn generic_coding_write_compares_with_previous_value() {
        let mut session = build_session();

        session
            .set_answer(q(4), AnswerRecord::Coding(boilerplate()))
            .unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Viewed));

        let mut edited = boilerplate();
        edited.source_files[0].contents = "def solve():\n    return 42\n".into();
        session.set_answer(q(4), AnswerRecord::Coding(edited)).unwrap();
        assert_eq!(session.status(q(4)), Some(QuestionStatus::Attempted));
    }

    #[test]
    fn mismatched_answer_shape_is_rejected() {
        let mut session = build_session();
        let err = session
            .set_answer(q(1), AnswerRecord::Descriptive(DescriptiveAnswer::new("A")))
            .unwrap_err();

        assert_eq!(
            err,
            SessionError::AnswerKindMismatch {
                question: q(1),
                kind: QuestionKind::SingleChoice,
                expected: AnswerKind::SingleChoice,
                actual: AnswerKind::Descriptive,
            }
        );
        assert_eq!(session.answer(q(1)), None);
        assert_eq!(session.status(q(1)), Some(QuestionStatus::NotViewed));
    }

    #[test]
    fn previous_crosses_back_into_last_question_of_previous_section() {
        let mut session = build_session();
        session.jump_to(q(3)).unwrap();

        let nav = session.previous().unwrap();

        assert_eq!(nav, Navigation::Moved { from: q(3), to: q(2) });
        assert_eq!(session.cursor().section_id, SectionId::new(1));
        assert_eq!(session.status(q(3)), Some(QuestionStatus::Viewed));
    }

    #[test]
    fn previous_at_first_question_is_no_op() {
        let mut session = build_session();
        assert!(!session.has_previous());
        assert_eq!(session.previous(), Ok(Navigation::Unchanged));
        assert_eq!(session.status(q(1)), Some(QuestionStatus::NotViewed));
    }

    #[test]
    fn mark_and_next_flags_then_moves() {
        let mut session = build_session();
        session
            .set_single_choice(q(1), SingleChoiceAnswer::selected(2))
            .unwrap();

        let nav = session.mark_and_next().unwrap();

        assert!(nav.moved());
        assert_eq!(session.status(q(1)), Some(QuestionStatus::MarkedForReview));
        assert_eq!(session.cursor().question_id, q(2));
    }

    #[test]
    fn mark_and_next_on_last_question_only_flags() {
        let mut session = build_session();
        session.jump_to(q(4)).unwrap();

        assert_eq!(session.mark_and_next(), Ok(Navigation::Unchanged));
        assert_eq!(session.status(q(4)), Some(QuestionStatus::MarkedForReview));
        assert_eq!(session.cursor().question_id, q(4));
    }

    #[test]
    fn jump_to_current_question_changes_nothing() {
        let mut session = build_session();
        assert_eq!(session.jump_to(q(1)), Ok(Navigation::Unchanged));
        assert_eq!(session.status(q(1)), Some(QuestionStatus::NotViewed));
    }

    #[test]
    fn empty_next_section_leaves_cursor_in_place() {
        let mut session = ExamSession::start(
            vec![question(1, 1, QuestionKind::TrueFalse), question(2, 3, QuestionKind::TrueFalse)],
            vec![section(1, 1), section(2, 0), section(3, 1)],
            None,
            SessionSettings::standard(),
            &fixed_clock(),
        )
        .unwrap();

        assert_eq!(
            session.next(),
            Err(SessionError::InconsistentSectionId(SectionId::new(2)))
        );
        assert_eq!(session.cursor().question_id, q(1));
        assert_eq!(session.status(q(1)), Some(QuestionStatus::NotViewed));

        assert_eq!(session.mark_and_next(), Ok(Navigation::Unchanged));
        assert_eq!(session.status(q(1)), Some(QuestionStatus::MarkedForReview));
    }

    #[test]
    fn section_stats_cover_only_that_section() {
        let mut session = build_session();
        session.mark_attempted(q(3)).unwrap();

        let stats = session.section_stats(SectionId::new(2)).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.attempted, 1);
        assert_eq!(session.section_stats(SectionId::new(9)), None);
    }

    #[test]
    fn time_limit_sums_sections_unless_overridden() {
        let session = build_session();
        assert_eq!(session.time_limit_minutes(), 60);

        let overridden = ExamSession::start(
            vec![question(1, 1, QuestionKind::Descriptive)],
            vec![section(1, 1)],
            None,
            SessionSettings::new(1_000, Some(15), false).unwrap(),
            &fixed_clock(),
        )
        .unwrap();
        assert_eq!(overridden.time_limit_minutes(), 15);
    }

    #[test]
    fn submission_carries_final_state() {
        let mut session = build_session();
        session
            .set_descriptive(q(3), DescriptiveAnswer::new("done"))
            .unwrap();
        session.mark_for_review(q(2)).unwrap();
        let id = session.id();

        let submission = session.submit(&fixed_clock());

        assert_eq!(submission.session_id, id);
        assert_eq!(submission.statuses.len(), 4);
        assert_eq!(submission.statuses[&q(2)], QuestionStatus::MarkedForReview);
        assert_eq!(submission.answers.len(), 1);
        assert_eq!(submission.stats.attempted, 1);
        assert_eq!(submission.stats.for_review, 1);
        assert_eq!(submission.started_at, submission.submitted_at);
    }
}
