//! Grade calculation engine
//!
//! Three layers, each a pure function of the layer below:
//! - [`SubjectCalculator`]: clamped scores, weighted average and required final score
//! - [`BlocAggregator`]: bloc MOG, per-subject MOG-need hints and validation status
//! - [`OverallAggregator`]: ECTS-weighted semester GPA
//!
//! The targets are injected at construction so several configurations can
//! coexist.

pub mod bloc;
pub mod overall;
pub mod subject;

pub use bloc::{BlocAggregator, BlocResult, BlocStatus, MogNeed, SubjectNeed, SubjectSnapshot};
pub use overall::{BlocSnapshot, ColorTag, OverallAggregator, OverallGpa, OverallResult};
pub use subject::{clamp_grade, weighted_average, SubjectCalculator, SubjectResult};

/// Lowest grade a score field can hold.
pub const GRADE_MIN: f64 = 0.0;

/// Highest grade a score field can hold.
pub const GRADE_MAX: f64 = 20.0;

/// Required final score reported when the final exam carries no weight.
pub const IMPOSSIBLE_SCORE: f64 = GRADE_MAX + 1.0;

/// Grades the engine measures progress against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingTargets {
    /// Average a subject needs to pass
    pub passing_grade: f64,
    /// MOG a bloc (and the semester) needs to be validated
    pub target_mog: f64,
}

impl GradingTargets {
    /// Create a target pair
    #[must_use]
    pub const fn new(passing_grade: f64, target_mog: f64) -> Self {
        Self {
            passing_grade,
            target_mog,
        }
    }
}

impl Default for GradingTargets {
    fn default() -> Self {
        Self::new(10.0, 10.0)
    }
}
