//! Per-subject calculation: clamping, weighted average and required final score

use super::{GradingTargets, GRADE_MAX, GRADE_MIN, IMPOSSIBLE_SCORE};
use crate::core::display::{format_field, format_optional, Hint, EM_DASH};
use crate::core::models::{Subject, Weights};

/// Clamp a score into the grade range. `NaN` becomes 0.
#[must_use]
pub fn clamp_grade(value: f64) -> f64 {
    if value.is_nan() {
        return GRADE_MIN;
    }
    value.clamp(GRADE_MIN, GRADE_MAX)
}

/// Weighted average of a midterm/final pair.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn weighted_average(midterm: f64, final_exam: f64, weights: Weights) -> f64 {
    midterm * weights.midterm + final_exam * weights.final_exam
}

/// Outcome of evaluating one subject
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectResult {
    /// Clamped midterm score, if present
    pub midterm: Option<f64>,
    /// Clamped final-exam score, if present
    pub final_exam: Option<f64>,
    /// Weights used for the average
    pub weights: Weights,
    /// Final score needed to reach the passing grade (unclamped), when the midterm is known
    pub required_final: Option<f64>,
    /// Weighted average, when both scores are known
    pub average: Option<f64>,
}

impl SubjectResult {
    /// Whether both scores are present and the average is a number
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.average.is_some()
    }

    /// Classified required-final hint
    #[must_use]
    pub fn required_final_hint(&self) -> Option<Hint> {
        self.required_final.map(Hint::classify)
    }

    /// Text of the "required final" cell
    #[must_use]
    pub fn required_final_display(&self) -> String {
        self.required_final_hint()
            .map_or_else(|| EM_DASH.to_string(), |hint| hint.to_string())
    }

    /// Text of the "average" cell
    #[must_use]
    pub fn average_display(&self) -> String {
        format_optional(self.average)
    }

    /// Clamped midterm as field text (empty when absent)
    #[must_use]
    pub fn midterm_field(&self) -> String {
        self.midterm.map(format_field).unwrap_or_default()
    }

    /// Clamped final score as field text (empty when absent)
    #[must_use]
    pub fn final_field(&self) -> String {
        self.final_exam.map(format_field).unwrap_or_default()
    }
}

/// Computes per-subject averages and required final scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectCalculator {
    targets: GradingTargets,
    default_weights: Weights,
}

impl SubjectCalculator {
    /// Create a calculator for the given targets and fallback weights
    #[must_use]
    pub const fn new(targets: GradingTargets, default_weights: Weights) -> Self {
        Self {
            targets,
            default_weights,
        }
    }

    /// Targets this calculator measures against
    #[must_use]
    pub const fn targets(&self) -> GradingTargets {
        self.targets
    }

    /// The subject's explicit weights when both parse as numbers, else the default pair
    #[must_use]
    pub fn resolve_weights(&self, subject: &Subject) -> Weights {
        subject.explicit_weights().unwrap_or(self.default_weights)
    }

    /// Final score solving `w.midterm * midterm + w.final * x = passing_grade`.
    ///
    /// The result is not clamped: `<= 0` means the passing grade is already
    /// secured and anything above the grade range means it cannot be reached.
    /// A zero final weight yields [`IMPOSSIBLE_SCORE`].
    #[must_use]
    #[allow(clippy::float_cmp, clippy::suboptimal_flops)]
    pub fn required_final_score(&self, midterm: f64, weights: Weights) -> f64 {
        if weights.final_exam == 0.0 {
            return IMPOSSIBLE_SCORE;
        }
        (self.targets.passing_grade - midterm * weights.midterm) / weights.final_exam
    }

    /// Evaluate a subject without touching its fields
    #[must_use]
    pub fn evaluate(&self, subject: &Subject) -> SubjectResult {
        let weights = self.resolve_weights(subject);
        let midterm = subject.midterm_score().map(clamp_grade);
        let final_exam = subject.final_score().map(clamp_grade);

        let required_final = midterm.map(|m| self.required_final_score(m, weights));
        let average = midterm
            .zip(final_exam)
            .map(|(m, f)| weighted_average(m, f, weights))
            .filter(|avg| !avg.is_nan());

        SubjectResult {
            midterm,
            final_exam,
            weights,
            required_final,
            average,
        }
    }

    /// Evaluate a subject and write the clamped scores back into its fields
    ///
    /// Absent or unparsable fields are left as they are.
    pub fn update(&self, subject: &mut Subject) -> SubjectResult {
        let result = self.evaluate(subject);
        if result.midterm.is_some() {
            subject.midterm = result.midterm_field();
        }
        if result.final_exam.is_some() {
            subject.final_exam = result.final_field();
        }
        result
    }
}

impl Default for SubjectCalculator {
    fn default() -> Self {
        Self::new(GradingTargets::default(), Weights::default())
    }
}
