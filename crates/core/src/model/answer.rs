use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

//
// ─── ANSWER KIND ───────────────────────────────────────────────────────────────
//

/// The six answer shapes. Several question kinds may share one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    SingleChoice,
    MultipleChoice,
    MatchPairs,
    FillBlanks,
    Descriptive,
    Coding,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnswerKind::SingleChoice => "single_choice",
            AnswerKind::MultipleChoice => "multiple_choice",
            AnswerKind::MatchPairs => "match_pairs",
            AnswerKind::FillBlanks => "fill_blanks",
            AnswerKind::Descriptive => "descriptive",
            AnswerKind::Coding => "coding",
        };
        f.write_str(name)
    }
}

//
// ─── PAYLOADS ──────────────────────────────────────────────────────────────────
//

/// Selected option index of a single-choice (or true/false) question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SingleChoiceAnswer {
    pub selected: Option<usize>,
}

impl SingleChoiceAnswer {
    #[must_use]
    pub fn selected(index: usize) -> Self {
        Self {
            selected: Some(index),
        }
    }

    /// Builds from a signed index where any negative value means "nothing
    /// selected", as option lists commonly report.
    #[must_use]
    pub fn from_signed(index: i64) -> Self {
        Self {
            selected: usize::try_from(index).ok(),
        }
    }
}

/// Selected option indices of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultipleChoiceAnswer {
    pub selected: BTreeSet<usize>,
}

impl MultipleChoiceAnswer {
    #[must_use]
    pub fn new(selected: impl IntoIterator<Item = usize>) -> Self {
        Self {
            selected: selected.into_iter().collect(),
        }
    }
}

/// Assignment of left items to right items, keyed by left index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchPairsAnswer {
    pub pairs: BTreeMap<usize, usize>,
}

impl MatchPairsAnswer {
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }
}

/// Text typed into each blank, keyed by blank index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillBlanksAnswer {
    pub blanks: BTreeMap<usize, String>,
}

impl FillBlanksAnswer {
    #[must_use]
    pub fn new<S: Into<String>>(blanks: impl IntoIterator<Item = (usize, S)>) -> Self {
        Self {
            blanks: blanks.into_iter().map(|(i, s)| (i, s.into())).collect(),
        }
    }
}

/// Free text answer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DescriptiveAnswer {
    pub text: String,
}

impl DescriptiveAnswer {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// One file in a coding answer's workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub id: String,
    pub name: String,
    pub contents: String,
}

/// Editor state of a coding question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingAnswer {
    pub source_files: Vec<SourceFile>,
    pub active_file_id: String,
    pub language: String,
}

impl CodingAnswer {
    #[must_use]
    pub fn active_file(&self) -> Option<&SourceFile> {
        self.source_files
            .iter()
            .find(|file| file.id == self.active_file_id)
    }
}

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// Current response to one question, one variant per answer shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerRecord {
    SingleChoice(SingleChoiceAnswer),
    MultipleChoice(MultipleChoiceAnswer),
    MatchPairs(MatchPairsAnswer),
    FillBlanks(FillBlanksAnswer),
    Descriptive(DescriptiveAnswer),
    Coding(CodingAnswer),
}

impl AnswerRecord {
    #[must_use]
    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerRecord::SingleChoice(_) => AnswerKind::SingleChoice,
            AnswerRecord::MultipleChoice(_) => AnswerKind::MultipleChoice,
            AnswerRecord::MatchPairs(_) => AnswerKind::MatchPairs,
            AnswerRecord::FillBlanks(_) => AnswerKind::FillBlanks,
            AnswerRecord::Descriptive(_) => AnswerKind::Descriptive,
            AnswerRecord::Coding(_) => AnswerKind::Coding,
        }
    }

    /// Whether this value counts as an attempt on its own.
    ///
    /// Coding answers always return `false`: the editor starts from
    /// boilerplate, so only the editor can tell whether the candidate changed
    /// anything.
    #[must_use]
    pub fn is_attempted(&self) -> bool {
        match self {
            AnswerRecord::SingleChoice(answer) => answer.selected.is_some(),
            AnswerRecord::MultipleChoice(answer) => !answer.selected.is_empty(),
            AnswerRecord::MatchPairs(answer) => !answer.pairs.is_empty(),
            AnswerRecord::FillBlanks(answer) => answer
                .blanks
                .values()
                .any(|text| !text.trim().is_empty()),
            AnswerRecord::Descriptive(answer) => !answer.text.trim().is_empty(),
            AnswerRecord::Coding(_) => false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
