//! Bloc aggregation: current MOG, MOG-need hints and validation status

use super::{GradingTargets, SubjectResult};
use crate::core::display::{format_optional, round_display, Hint, EM_DASH};
use crate::core::models::Subject;
use std::fmt;

/// What the bloc aggregation needs to know about one subject
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSnapshot {
    /// Display name, used to label MOG-need hints
    pub name: String,
    /// ECTS credits
    pub ects: f64,
    /// Whether the subject currently counts (not a deselected elective)
    pub active: bool,
    /// Displayed weighted average, when both scores are known
    pub average: Option<f64>,
}

impl SubjectSnapshot {
    /// Create a snapshot from raw values
    #[must_use]
    pub const fn new(name: String, ects: f64, active: bool, average: Option<f64>) -> Self {
        Self {
            name,
            ects,
            active,
            average,
        }
    }

    /// Snapshot a subject together with its evaluated result
    ///
    /// The average is taken as displayed (two decimals).
    #[must_use]
    pub fn from_result(subject: &Subject, result: &SubjectResult) -> Self {
        Self::new(
            subject.name.clone(),
            subject.ects,
            subject.active,
            result.average.map(round_display),
        )
    }

    fn is_counted(&self) -> bool {
        self.active && self.ects > 0.0
    }
}

/// Validation status of a bloc
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlocStatus {
    /// No active subject carries credits (e.g. waiting for an elective choice)
    NoActiveSubjects,
    /// Some counted subjects are still missing a score
    InProgress,
    /// Every counted subject is graded and the MOG reaches the target
    Validated,
    /// Every counted subject is graded and the MOG is below the target
    NotValidated,
}

impl BlocStatus {
    /// Whether every counted subject is graded
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Validated | Self::NotValidated)
    }
}

impl fmt::Display for BlocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveSubjects => write!(f, "{EM_DASH}"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Validated => write!(f, "Validé"),
            Self::NotValidated => write!(f, "Non Validé"),
        }
    }
}

/// Average an incomplete subject needs for the bloc to reach its target MOG
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectNeed {
    /// Subject name
    pub name: String,
    /// Subject ECTS
    pub ects: f64,
    /// Raw required average (unclamped)
    pub required: f64,
}

impl SubjectNeed {
    /// Classified hint for this subject
    #[must_use]
    pub fn hint(&self) -> Hint {
        Hint::classify(self.required)
    }
}

impl fmt::Display for SubjectNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.hint())
    }
}

/// Content of the MOG-need cell
#[derive(Debug, Clone, PartialEq)]
pub enum MogNeed {
    /// No counted subject
    NoActiveSubjects,
    /// Every counted subject is graded
    AllDone,
    /// One hint per incomplete subject
    Pending(Vec<SubjectNeed>),
}

impl fmt::Display for MogNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveSubjects => write!(f, "{EM_DASH}"),
            Self::AllDone => write!(f, "All Done"),
            Self::Pending(needs) => {
                for (idx, need) in needs.iter().enumerate() {
                    if idx > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{need}")?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of aggregating one bloc
#[derive(Debug, Clone, PartialEq)]
pub struct BlocResult {
    /// ECTS of every counted subject
    pub counted_ects: f64,
    /// ECTS of counted subjects with both scores
    pub completed_ects: f64,
    /// Σ average × ECTS over completed subjects
    pub total_weighted_grade: f64,
    /// Credit-weighted average over completed subjects
    pub current_mog: Option<f64>,
    /// MOG-need hints
    pub need: MogNeed,
    /// Validation status
    pub status: BlocStatus,
}

impl BlocResult {
    /// Text of the MOG cell
    #[must_use]
    pub fn mog_display(&self) -> String {
        format_optional(self.current_mog)
    }

    /// Text of the MOG-need cell
    #[must_use]
    pub fn mog_need_display(&self) -> String {
        self.need.to_string()
    }

    /// Text of the result cell
    #[must_use]
    pub fn status_display(&self) -> String {
        self.status.to_string()
    }
}

/// Aggregates the subjects of a bloc
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlocAggregator {
    targets: GradingTargets,
}

impl BlocAggregator {
    /// Create an aggregator for the given targets
    #[must_use]
    pub const fn new(targets: GradingTargets) -> Self {
        Self { targets }
    }

    /// Aggregate a bloc from snapshots of its subjects
    ///
    /// Inactive subjects and subjects without positive credits are ignored.
    #[must_use]
    pub fn aggregate(&self, subjects: &[SubjectSnapshot]) -> BlocResult {
        let mut counted_ects = 0.0;
        let mut completed_ects = 0.0;
        let mut total_weighted_grade = 0.0;
        let mut incomplete: Vec<&SubjectSnapshot> = Vec::new();

        for subject in subjects.iter().filter(|s| s.is_counted()) {
            counted_ects += subject.ects;
            match subject.average {
                Some(average) => {
                    total_weighted_grade += average * subject.ects;
                    completed_ects += subject.ects;
                }
                None => incomplete.push(subject),
            }
        }

        let current_mog = (completed_ects > 0.0).then(|| total_weighted_grade / completed_ects);
        let has_counted = counted_ects > 0.0;

        let need = if !has_counted {
            MogNeed::NoActiveSubjects
        } else if incomplete.is_empty() {
            MogNeed::AllDone
        } else {
            let remaining_ects = counted_ects - completed_ects;
            MogNeed::Pending(
                incomplete
                    .iter()
                    .map(|s| SubjectNeed {
                        name: s.name.clone(),
                        ects: s.ects,
                        required: self.required_average(
                            counted_ects,
                            total_weighted_grade,
                            remaining_ects - s.ects,
                            s.ects,
                        ),
                    })
                    .collect(),
            )
        };

        let status = if !has_counted {
            BlocStatus::NoActiveSubjects
        } else if !incomplete.is_empty() {
            BlocStatus::InProgress
        } else if current_mog.is_some_and(|mog| mog >= self.targets.target_mog) {
            BlocStatus::Validated
        } else {
            BlocStatus::NotValidated
        };

        BlocResult {
            counted_ects,
            completed_ects,
            total_weighted_grade,
            current_mog,
            need,
            status,
        }
    }

    /// Average a subject needs, assuming every other incomplete subject lands
    /// exactly on the passing grade, for the bloc to reach the target MOG.
    #[allow(clippy::suboptimal_flops)]
    fn required_average(
        &self,
        counted_ects: f64,
        total_weighted_grade: f64,
        other_remaining_ects: f64,
        subject_ects: f64,
    ) -> f64 {
        let known_points =
            total_weighted_grade + other_remaining_ects * self.targets.passing_grade;
        (self.targets.target_mog * counted_ects - known_points) / subject_ects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(name: &str, ects: f64, average: Option<f64>) -> SubjectSnapshot {
        SubjectSnapshot::new(name.to_string(), ects, true, average)
    }

    #[test]
    fn one_completed_one_pending() {
        let result = BlocAggregator::default()
            .aggregate(&[snap("Algo", 5.0, Some(12.0)), snap("Networks", 5.0, None)]);

        assert!((result.counted_ects - 10.0).abs() < f64::EPSILON);
        assert!((result.completed_ects - 5.0).abs() < f64::EPSILON);
        assert_eq!(result.mog_display(), "12.00");
        assert_eq!(result.status, BlocStatus::InProgress);
        assert_eq!(result.status_display(), "In Progress");
        assert_eq!(result.mog_need_display(), "Networks: Need 8.00");
    }

    #[test]
    fn hints_assume_other_pending_subjects_pass() {
        // (10*9 - 2*11 - 3*10) / 4 = 9.5
        let result = BlocAggregator::default().aggregate(&[
            snap("A", 2.0, Some(11.0)),
            snap("B", 4.0, None),
            snap("C", 3.0, None),
        ]);
        assert_eq!(
            result.mog_need_display(),
            "B: Need 9.50 | C: Need 9.33"
        );
    }

    #[test]
    fn hints_classify_extremes() {
        let high = BlocAggregator::default()
            .aggregate(&[snap("A", 8.0, Some(20.0)), snap("B", 2.0, None)]);
        assert_eq!(high.mog_need_display(), "B: 0.0");

        let low = BlocAggregator::default()
            .aggregate(&[snap("A", 8.0, Some(2.0)), snap("B", 2.0, None)]);
        assert_eq!(low.mog_need_display(), "B: Impossible");
    }

    #[test]
    fn fully_graded_bloc_is_validated_or_not() {
        let passed = BlocAggregator::default()
            .aggregate(&[snap("A", 3.0, Some(10.0)), snap("B", 3.0, Some(14.0))]);
        assert_eq!(passed.status_display(), "Validé");
        assert_eq!(passed.mog_need_display(), "All Done");
        assert_eq!(passed.mog_display(), "12.00");

        let failed = BlocAggregator::default()
            .aggregate(&[snap("A", 3.0, Some(9.0)), snap("B", 1.0, Some(10.0))]);
        assert_eq!(failed.status_display(), "Non Validé");
    }

    #[test]
    fn compensation_between_subjects_validates() {
        let result = BlocAggregator::default()
            .aggregate(&[snap("A", 4.0, Some(8.0)), snap("B", 4.0, Some(12.5))]);
        assert_eq!(result.status, BlocStatus::Validated);
    }

    #[test]
    fn inactive_and_zero_credit_subjects_are_ignored() {
        let mut german = snap("German", 2.0, None);
        german.active = false;
        let result = BlocAggregator::default().aggregate(&[
            snap("Spanish", 2.0, Some(13.0)),
            german,
            snap("Club", 0.0, None),
        ]);
        assert!((result.counted_ects - 2.0).abs() < f64::EPSILON);
        assert_eq!(result.status, BlocStatus::Validated);
        assert_eq!(result.mog_need_display(), "All Done");
    }

    #[test]
    fn empty_bloc_shows_placeholders() {
        let result = BlocAggregator::default().aggregate(&[]);
        assert_eq!(result.status, BlocStatus::NoActiveSubjects);
        assert_eq!(result.mog_display(), "—");
        assert_eq!(result.mog_need_display(), "—");
        assert_eq!(result.status_display(), "—");
    }

    #[test]
    fn nothing_graded_yet() {
        let result = BlocAggregator::default()
            .aggregate(&[snap("A", 5.0, None), snap("B", 5.0, None)]);
        assert!(result.current_mog.is_none());
        assert_eq!(result.mog_display(), "—");
        assert_eq!(result.status, BlocStatus::InProgress);
        assert_eq!(result.mog_need_display(), "A: Need 10.00 | B: Need 10.00");
    }

    #[test]
    fn target_mog_is_injected() {
        let strict = BlocAggregator::new(GradingTargets::new(10.0, 12.0));
        let result = strict.aggregate(&[snap("A", 5.0, Some(11.0))]);
        assert_eq!(result.status, BlocStatus::NotValidated);
    }
}
