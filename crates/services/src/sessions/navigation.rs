use std::collections::HashMap;

use exam_core::model::{Question, QuestionId, Section, SectionId};

use crate::error::SessionError;

/// Where a question sits: index into the section list, then index into
/// that section's questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    section: usize,
    index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionSlot {
    id: SectionId,
    questions: Vec<QuestionId>,
}

/// Result of asking the layout for a neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    To(QuestionId),
    /// Already at the first/last question of the whole session.
    Edge,
    /// The neighbouring section has no questions.
    EmptySection(SectionId),
}

/// Ordered sections and questions, resolved purely by position.
///
/// Section order is the order of the supplied section list; question order
/// inside a section is the order of the supplied question list. Section ids
/// are never used arithmetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SectionLayout {
    sections: Vec<SectionSlot>,
    positions: HashMap<QuestionId, Position>,
}

impl SectionLayout {
    pub(crate) fn build(sections: &[Section], questions: &[Question]) -> Result<Self, SessionError> {
        let mut slots: Vec<SectionSlot> = Vec::with_capacity(sections.len());
        let mut slot_of: HashMap<SectionId, usize> = HashMap::with_capacity(sections.len());
        for section in sections {
            if slot_of.insert(section.id(), slots.len()).is_some() {
                return Err(SessionError::DuplicateSection(section.id()));
            }
            slots.push(SectionSlot {
                id: section.id(),
                questions: Vec::new(),
            });
        }

        let mut positions = HashMap::with_capacity(questions.len());
        for question in questions {
            let Some(&section) = slot_of.get(&question.section_id()) else {
                return Err(SessionError::UnknownSection {
                    question: question.id(),
                    section: question.section_id(),
                });
            };
            let slot = &mut slots[section];
            let position = Position {
                section,
                index: slot.questions.len(),
            };
            if positions.insert(question.id(), position).is_some() {
                return Err(SessionError::DuplicateQuestion(question.id()));
            }
            slot.questions.push(question.id());
        }

        Ok(Self {
            sections: slots,
            positions,
        })
    }

    pub(crate) fn contains(&self, id: QuestionId) -> bool {
        self.positions.contains_key(&id)
    }

    pub(crate) fn section_of(&self, id: QuestionId) -> Option<SectionId> {
        self.positions
            .get(&id)
            .map(|position| self.sections[position.section].id)
    }

    /// First question of the first non-empty section.
    pub(crate) fn first(&self) -> Option<QuestionId> {
        self.sections
            .iter()
            .find_map(|slot| slot.questions.first().copied())
    }

    /// Questions in navigation order: section by section.
    pub(crate) fn ordered(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.sections
            .iter()
            .flat_map(|slot| slot.questions.iter().copied())
    }

    pub(crate) fn questions_in(&self, section: SectionId) -> Option<&[QuestionId]> {
        self.sections
            .iter()
            .find(|slot| slot.id == section)
            .map(|slot| slot.questions.as_slice())
    }

    pub(crate) fn next_of(&self, id: QuestionId) -> Option<Step> {
        let position = *self.positions.get(&id)?;
        let slot = &self.sections[position.section];
        if let Some(next) = slot.questions.get(position.index + 1) {
            return Some(Step::To(*next));
        }
        let Some(next_slot) = self.sections.get(position.section + 1) else {
            return Some(Step::Edge);
        };
        Some(match next_slot.questions.first() {
            Some(first) => Step::To(*first),
            None => Step::EmptySection(next_slot.id),
        })
    }

    pub(crate) fn previous_of(&self, id: QuestionId) -> Option<Step> {
        let position = *self.positions.get(&id)?;
        let slot = &self.sections[position.section];
        if let Some(index) = position.index.checked_sub(1) {
            return Some(Step::To(slot.questions[index]));
        }
        let Some(section) = position.section.checked_sub(1) else {
            return Some(Step::Edge);
        };
        let previous_slot = &self.sections[section];
        Some(match previous_slot.questions.last() {
            Some(last) => Step::To(*last),
            None => Step::EmptySection(previous_slot.id),
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::QuestionKind;

    fn section(id: u64) -> Section {
        Section::new(SectionId::new(id), format!("S{id}"), 0, 0, 10)
    }

    fn question(id: u64, section: u64) -> Question {
        Question::new(
            QuestionId::new(id),
            SectionId::new(section),
            QuestionKind::SingleChoice,
            1,
            Vec::new(),
        )
    }

    #[test]
    fn non_sequential_section_ids_follow_list_order() {
        // Section 70 comes before section 5 because the list says so.
        let layout = SectionLayout::build(
            &[section(70), section(5)],
            &[question(1, 5), question(2, 70), question(3, 5)],
        )
        .unwrap();

        assert_eq!(layout.first(), Some(QuestionId::new(2)));
        assert_eq!(
            layout.next_of(QuestionId::new(2)),
            Some(Step::To(QuestionId::new(1)))
        );
        assert_eq!(
            layout.next_of(QuestionId::new(1)),
            Some(Step::To(QuestionId::new(3)))
        );
        assert_eq!(layout.next_of(QuestionId::new(3)), Some(Step::Edge));
        assert_eq!(
            layout.previous_of(QuestionId::new(1)),
            Some(Step::To(QuestionId::new(2)))
        );
        assert_eq!(layout.previous_of(QuestionId::new(2)), Some(Step::Edge));

        let ordered: Vec<_> = layout.ordered().map(|id| id.value()).collect();
        assert_eq!(ordered, vec![2, 1, 3]);
    }

    #[test]
    fn empty_neighbour_section_is_reported() {
        let layout = SectionLayout::build(
            &[section(1), section(2), section(3)],
            &[question(1, 1), question(2, 3)],
        )
        .unwrap();

        assert_eq!(
            layout.next_of(QuestionId::new(1)),
            Some(Step::EmptySection(SectionId::new(2)))
        );
        assert_eq!(
            layout.previous_of(QuestionId::new(2)),
            Some(Step::EmptySection(SectionId::new(2)))
        );
        assert_eq!(layout.questions_in(SectionId::new(2)), Some(&[][..]));
    }

    #[test]
    fn unknown_question_has_no_neighbours() {
        let layout = SectionLayout::build(&[section(1)], &[question(1, 1)]).unwrap();
        assert_eq!(layout.next_of(QuestionId::new(4)), None);
        assert!(!layout.contains(QuestionId::new(4)));
    }

    #[test]
    fn rejects_duplicates_and_orphans() {
        assert_eq!(
            SectionLayout::build(&[section(1)], &[question(1, 1), question(1, 1)]),
            Err(SessionError::DuplicateQuestion(QuestionId::new(1)))
        );
        assert_eq!(
            SectionLayout::build(&[section(1), section(1)], &[question(1, 1)]),
            Err(SessionError::DuplicateSection(SectionId::new(1)))
        );
        assert_eq!(
            SectionLayout::build(&[section(1)], &[question(1, 2)]),
            Err(SessionError::UnknownSection {
                question: QuestionId::new(1),
                section: SectionId::new(2),
            })
        );
    }
}
