use serde::{Deserialize, Serialize};

use crate::model::status::QuestionStatus;

/// Progress counts derived from question statuses.
///
/// Never stored by the session; computed on demand so that
/// `attempted + viewed + not_viewed + for_review == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub attempted: usize,
    pub viewed: usize,
    pub not_viewed: usize,
    pub for_review: usize,
    pub total: usize,
}

impl SessionStats {
    /// Counts each status once.
    #[must_use]
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = QuestionStatus>,
    {
        let mut stats = Self::default();
        for status in statuses {
            match status {
                QuestionStatus::Attempted => stats.attempted += 1,
                QuestionStatus::Viewed => stats.viewed += 1,
                QuestionStatus::NotViewed => stats.not_viewed += 1,
                QuestionStatus::MarkedForReview => stats.for_review += 1,
            }
            stats.total += 1;
        }
        stats
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.attempted + self.viewed + self.not_viewed + self.for_review == self.total
    }

    /// Questions the candidate has not answered yet (anything but `Attempted`).
    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.total.saturating_sub(self.attempted)
    }
}
