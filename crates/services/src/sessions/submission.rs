use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use exam_core::model::{AnswerRecord, QuestionId, QuestionStatus, SessionId, SessionStats};

/// Final state of a session, produced by [`super::ExamSession::submit`].
///
/// Presentation- and transport-agnostic: the caller decides how (and whether)
/// to persist or send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub submitted_at: DateTime<Utc>,
    pub statuses: BTreeMap<QuestionId, QuestionStatus>,
    pub answers: BTreeMap<QuestionId, AnswerRecord>,
    pub stats: SessionStats,
}
