//! Data models for `MogTracker`

pub mod bloc;
pub mod semester;
pub mod subject;

pub use bloc::Bloc;
pub use semester::Semester;
pub use subject::{parse_number, ScoreField, Subject, Weights};
