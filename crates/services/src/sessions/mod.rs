mod answers;
mod navigation;
mod progress;
mod service;
mod status;
mod submission;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use answers::AnswerStore;
pub use service::{ExamSession, Navigation, SessionCursor};
pub use status::{StatusChange, StatusStore};
pub use submission::Submission;
