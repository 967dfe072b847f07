use std::collections::HashMap;

use exam_core::model::{QuestionId, QuestionStatus};

use crate::error::SessionError;

/// A status write as seen by the store: what it was and what it is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub question_id: QuestionId,
    pub from: QuestionStatus,
    pub to: QuestionStatus,
}

impl StatusChange {
    #[must_use]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// One status per question, created `NotViewed` at session start.
///
/// The key set is fixed at construction; writes for unknown ids are rejected
/// so the store never grows or shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStore {
    statuses: HashMap<QuestionId, QuestionStatus>,
}

impl StatusStore {
    pub(crate) fn new(ids: impl IntoIterator<Item = QuestionId>) -> Self {
        Self {
            statuses: ids
                .into_iter()
                .map(|id| (id, QuestionStatus::NotViewed))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<QuestionStatus> {
        self.statuses.get(&id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Unordered view of every status.
    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, QuestionStatus)> + '_ {
        self.statuses.iter().map(|(id, status)| (*id, *status))
    }

    /// Always sets `Attempted`.
    pub(crate) fn mark_attempted(&mut self, id: QuestionId) -> Result<StatusChange, SessionError> {
        self.write(id, |_| QuestionStatus::Attempted)
    }

    /// Sets `Viewed` unless the question is already `Attempted`.
    pub(crate) fn mark_viewed(&mut self, id: QuestionId) -> Result<StatusChange, SessionError> {
        self.write(id, |current| match current {
            QuestionStatus::Attempted => QuestionStatus::Attempted,
            _ => QuestionStatus::Viewed,
        })
    }

    /// Always sets `MarkedForReview`, including over `Attempted`.
    pub(crate) fn mark_for_review(&mut self, id: QuestionId) -> Result<StatusChange, SessionError> {
        self.write(id, |_| QuestionStatus::MarkedForReview)
    }

    /// Applied to the question the cursor is leaving: only `NotViewed`
    /// becomes `Viewed`.
    pub(crate) fn mark_left(&mut self, id: QuestionId) -> Result<StatusChange, SessionError> {
        self.write(id, |current| match current {
            QuestionStatus::NotViewed => QuestionStatus::Viewed,
            other => other,
        })
    }

    fn write(
        &mut self,
        id: QuestionId,
        next: impl FnOnce(QuestionStatus) -> QuestionStatus,
    ) -> Result<StatusChange, SessionError> {
        let Some(slot) = self.statuses.get_mut(&id) else {
            return Err(SessionError::InvalidQuestionId(id));
        };
        let from = *slot;
        let to = next(from);
        *slot = to;
        Ok(StatusChange {
            question_id: id,
            from,
            to,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StatusStore {
        StatusStore::new((1..=3).map(QuestionId::new))
    }

    #[test]
    fn starts_not_viewed() {
        let store = store();
        assert_eq!(store.len(), 3);
        assert!(store.iter().all(|(_, s)| s == QuestionStatus::NotViewed));
    }

    #[test]
    fn attempted_is_idempotent() {
        let mut store = store();
        let first = store.mark_attempted(QuestionId::new(1)).unwrap();
        let second = store.mark_attempted(QuestionId::new(1)).unwrap();

        assert!(first.changed());
        assert!(!second.changed());
        assert_eq!(store.get(QuestionId::new(1)), Some(QuestionStatus::Attempted));
    }

    #[test]
    fn viewing_never_downgrades_attempted() {
        let mut store = store();
        store.mark_attempted(QuestionId::new(2)).unwrap();
        let change = store.mark_viewed(QuestionId::new(2)).unwrap();

        assert!(!change.changed());
        assert_eq!(store.get(QuestionId::new(2)), Some(QuestionStatus::Attempted));
    }

    #[test]
    fn viewing_replaces_review_flag() {
        let mut store = store();
        store.mark_for_review(QuestionId::new(2)).unwrap();
        store.mark_viewed(QuestionId::new(2)).unwrap();
        assert_eq!(store.get(QuestionId::new(2)), Some(QuestionStatus::Viewed));
    }

    #[test]
    fn review_overrides_attempted() {
        let mut store = store();
        store.mark_attempted(QuestionId::new(3)).unwrap();
        store.mark_for_review(QuestionId::new(3)).unwrap();
        assert_eq!(
            store.get(QuestionId::new(3)),
            Some(QuestionStatus::MarkedForReview)
        );
    }

    #[test]
    fn leaving_only_upgrades_not_viewed() {
        let mut store = store();
        store.mark_for_review(QuestionId::new(1)).unwrap();

        store.mark_left(QuestionId::new(1)).unwrap();
        store.mark_left(QuestionId::new(2)).unwrap();

        assert_eq!(
            store.get(QuestionId::new(1)),
            Some(QuestionStatus::MarkedForReview)
        );
        assert_eq!(store.get(QuestionId::new(2)), Some(QuestionStatus::Viewed));
    }

    #[test]
    fn unknown_id_is_rejected_without_growing() {
        let mut store = store();
        let before = store.clone();

        let err = store.mark_attempted(QuestionId::new(99)).unwrap_err();

        assert_eq!(err, SessionError::InvalidQuestionId(QuestionId::new(99)));
        assert_eq!(store, before);
        assert_eq!(store.get(QuestionId::new(99)), None);
    }
}
