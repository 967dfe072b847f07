pub mod answer;
mod ids;
mod question;
mod section;
mod settings;
mod stats;
mod status;

pub use answer::{
    AnswerKind, AnswerRecord, CodingAnswer, DescriptiveAnswer, FillBlanksAnswer,
    MatchPairsAnswer, MultipleChoiceAnswer, SingleChoiceAnswer, SourceFile,
};
pub use ids::{ParseIdError, QuestionId, SectionId, SessionId};

pub use question::{Question, QuestionKind};
pub use section::Section;
pub use settings::{SessionSettings, SettingsError};
pub use stats::SessionStats;
pub use status::{QuestionStatus, StatusError};
