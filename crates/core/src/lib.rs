#![forbid(unsafe_code)]

//! Domain model of an in-progress timed assessment: questions, sections,
//! per-question status, answer records and derived progress stats.

pub mod model;
pub mod time;

pub use time::Clock;
