#![forbid(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod sessions;
pub mod timer;

pub use exam_core::Clock;
pub use sessions as session;

pub use dispatch::{AnswerSink, QuestionRenderer, RendererRegistry};
pub use error::{DispatchError, SessionError, TimerError};
pub use timer::{CountdownTimer, TickMode, TimerSnapshot};

pub use sessions::{
    AnswerStore, ExamSession, Navigation, SessionCursor, StatusChange, StatusStore, Submission,
};
