use exam_core::model::{QuestionId, SessionStats};

use super::status::StatusStore;

/// Stats over every question in the store.
pub(crate) fn overall(store: &StatusStore) -> SessionStats {
    SessionStats::tally(store.iter().map(|(_, status)| status))
}

/// Stats over a subset of questions, e.g. one section.
///
/// Ids missing from the store are skipped rather than counted.
pub(crate) fn subset(store: &StatusStore, ids: &[QuestionId]) -> SessionStats {
    SessionStats::tally(ids.iter().filter_map(|id| store.get(*id)))
}
