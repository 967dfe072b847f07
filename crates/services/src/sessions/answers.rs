use std::collections::{BTreeMap, HashMap};

use exam_core::model::{
    AnswerKind, AnswerRecord, CodingAnswer, DescriptiveAnswer, FillBlanksAnswer,
    MatchPairsAnswer, MultipleChoiceAnswer, QuestionId, SingleChoiceAnswer,
};

/// Current answers, one map per answer shape.
///
/// A missing entry means "no answer yet". Writes replace the stored value
/// wholesale. The session checks ids and kinds before writing, so a question
/// id appears in at most one map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerStore {
    single_choice: HashMap<QuestionId, SingleChoiceAnswer>,
    multiple_choice: HashMap<QuestionId, MultipleChoiceAnswer>,
    match_pairs: HashMap<QuestionId, MatchPairsAnswer>,
    fill_blanks: HashMap<QuestionId, FillBlanksAnswer>,
    descriptive: HashMap<QuestionId, DescriptiveAnswer>,
    coding: HashMap<QuestionId, CodingAnswer>,
}

impl AnswerStore {
    pub(crate) fn put(&mut self, id: QuestionId, record: AnswerRecord) {
        match record {
            AnswerRecord::SingleChoice(answer) => {
                self.single_choice.insert(id, answer);
            }
            AnswerRecord::MultipleChoice(answer) => {
                self.multiple_choice.insert(id, answer);
            }
            AnswerRecord::MatchPairs(answer) => {
                self.match_pairs.insert(id, answer);
            }
            AnswerRecord::FillBlanks(answer) => {
                self.fill_blanks.insert(id, answer);
            }
            AnswerRecord::Descriptive(answer) => {
                self.descriptive.insert(id, answer);
            }
            AnswerRecord::Coding(answer) => {
                self.coding.insert(id, answer);
            }
        }
    }

    /// Stored answer of the given shape, cloned into a record.
    #[must_use]
    pub fn get(&self, id: QuestionId, kind: AnswerKind) -> Option<AnswerRecord> {
        match kind {
            AnswerKind::SingleChoice => self
                .single_choice
                .get(&id)
                .copied()
                .map(AnswerRecord::SingleChoice),
            AnswerKind::MultipleChoice => self
                .multiple_choice
                .get(&id)
                .cloned()
                .map(AnswerRecord::MultipleChoice),
            AnswerKind::MatchPairs => self
                .match_pairs
                .get(&id)
                .cloned()
                .map(AnswerRecord::MatchPairs),
            AnswerKind::FillBlanks => self
                .fill_blanks
                .get(&id)
                .cloned()
                .map(AnswerRecord::FillBlanks),
            AnswerKind::Descriptive => self
                .descriptive
                .get(&id)
                .cloned()
                .map(AnswerRecord::Descriptive),
            AnswerKind::Coding => self.coding.get(&id).cloned().map(AnswerRecord::Coding),
        }
    }

    #[must_use]
    pub fn single_choice(&self) -> &HashMap<QuestionId, SingleChoiceAnswer> {
        &self.single_choice
    }

    #[must_use]
    pub fn multiple_choice(&self) -> &HashMap<QuestionId, MultipleChoiceAnswer> {
        &self.multiple_choice
    }

    #[must_use]
    pub fn match_pairs(&self) -> &HashMap<QuestionId, MatchPairsAnswer> {
        &self.match_pairs
    }

    #[must_use]
    pub fn fill_blanks(&self) -> &HashMap<QuestionId, FillBlanksAnswer> {
        &self.fill_blanks
    }

    #[must_use]
    pub fn descriptive(&self) -> &HashMap<QuestionId, DescriptiveAnswer> {
        &self.descriptive
    }

    #[must_use]
    pub fn coding(&self) -> &HashMap<QuestionId, CodingAnswer> {
        &self.coding
    }

    /// Number of questions with a stored answer of any shape.
    #[must_use]
    pub fn len(&self) -> usize {
        self.single_choice.len()
            + self.multiple_choice.len()
            + self.match_pairs.len()
            + self.fill_blanks.len()
            + self.descriptive.len()
            + self.coding.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens all maps into one id-ordered map.
    #[must_use]
    pub fn into_records(self) -> BTreeMap<QuestionId, AnswerRecord> {
        let mut records = BTreeMap::new();
        records.extend(
            self.single_choice
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::SingleChoice(a))),
        );
        records.extend(
            self.multiple_choice
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::MultipleChoice(a))),
        );
        records.extend(
            self.match_pairs
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::MatchPairs(a))),
        );
        records.extend(
            self.fill_blanks
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::FillBlanks(a))),
        );
        records.extend(
            self.descriptive
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::Descriptive(a))),
        );
        records.extend(
            self.coding
                .into_iter()
                .map(|(id, a)| (id, AnswerRecord::Coding(a))),
        );
        records
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_replaces_wholesale() {
        let mut store = AnswerStore::default();
        let id = QuestionId::new(1);

        store.put(id, AnswerRecord::MultipleChoice(MultipleChoiceAnswer::new([0, 2])));
        store.put(id, AnswerRecord::MultipleChoice(MultipleChoiceAnswer::new([3])));

        assert_eq!(
            store.get(id, AnswerKind::MultipleChoice),
            Some(AnswerRecord::MultipleChoice(MultipleChoiceAnswer::new([3])))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_looks_only_at_requested_shape() {
        let mut store = AnswerStore::default();
        let id = QuestionId::new(5);
        store.put(id, AnswerRecord::Descriptive(DescriptiveAnswer::new("essay")));

        assert!(store.get(id, AnswerKind::Descriptive).is_some());
        assert!(store.get(id, AnswerKind::FillBlanks).is_none());
        assert_eq!(store.descriptive().len(), 1);
        assert!(store.fill_blanks().is_empty());
    }

    #[test]
    fn into_records_is_ordered_by_id() {
        let mut store = AnswerStore::default();
        store.put(
            QuestionId::new(9),
            AnswerRecord::SingleChoice(SingleChoiceAnswer::selected(1)),
        );
        store.put(
            QuestionId::new(2),
            AnswerRecord::MatchPairs(MatchPairsAnswer::new([(0, 1)])),
        );

        let ids: Vec<_> = store.into_records().into_keys().collect();
        assert_eq!(ids, vec![QuestionId::new(2), QuestionId::new(9)]);
    }
}
