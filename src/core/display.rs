//! Display strings shared by every calculation layer
//!
//! All averages and GPAs are rendered with exactly two decimals and missing
//! values with an em dash, the same strings the tracking interface writes into
//! its cells.

use std::fmt;

/// Placeholder for a value that cannot be computed yet.
pub const EM_DASH: &str = "\u{2014}";

/// Highest grade a hint can ask for before it becomes impossible.
pub const HINT_CEILING: f64 = 20.0;

/// Format a grade or average with two decimals.
///
/// Ties round away from zero, matching [`round_display`], so a displayed cell
/// and the value aggregated from it always agree.
#[must_use]
pub fn format_grade(value: f64) -> String {
    format!("{:.2}", round_display(value))
}

/// Format an optional grade, falling back to the em dash.
#[must_use]
pub fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| EM_DASH.to_string(), format_grade)
}

/// Round to the two decimals shown in a display cell.
///
/// Bloc and semester aggregation read back the displayed averages, so they
/// work on rounded values.
#[must_use]
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a plain number the way a form field shows it (`20`, `12.5`).
#[must_use]
pub fn format_field(value: f64) -> String {
    format!("{value}")
}

/// A "what do I still need" hint.
///
/// Used both for the required final-exam score of a subject and for the
/// required average of an incomplete subject in a bloc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hint {
    /// Target already reached whatever the remaining score is.
    AlreadyMet,
    /// No score up to the grade ceiling can reach the target.
    Impossible,
    /// Score needed to reach the target.
    Need(f64),
}

impl Hint {
    /// Classify a raw required value: `<= 0` is already met, above the
    /// ceiling is impossible.
    #[must_use]
    pub fn classify(required: f64) -> Self {
        if required <= 0.0 {
            Self::AlreadyMet
        } else if required > HINT_CEILING {
            Self::Impossible
        } else {
            Self::Need(required)
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyMet => write!(f, "0.0"),
            Self::Impossible => write!(f, "Impossible"),
            Self::Need(value) => write!(f, "Need {}", format_grade(*value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_grade(10.0), "10.00");
        assert_eq!(format_grade(10.0 / 3.0), "3.33");
        assert_eq!(format_optional(None), "—");
        assert_eq!(format_optional(Some(12.0)), "12.00");
    }

    #[test]
    fn classifies_hints() {
        assert_eq!(Hint::classify(0.0), Hint::AlreadyMet);
        assert_eq!(Hint::classify(-4.2), Hint::AlreadyMet);
        assert_eq!(Hint::classify(21.0), Hint::Impossible);
        assert_eq!(Hint::classify(20.0), Hint::Need(20.0));
        assert_eq!(Hint::classify(8.0).to_string(), "Need 8.00");
        assert_eq!(Hint::AlreadyMet.to_string(), "0.0");
        assert_eq!(Hint::Impossible.to_string(), "Impossible");
    }

    #[test]
    fn field_format_drops_trailing_zero() {
        assert_eq!(format_field(20.0), "20");
        assert_eq!(format_field(12.5), "12.5");
        assert_eq!(format_field(0.0), "0");
    }

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(format_grade(10.125), "10.13");
        assert_eq!(format_grade(0.125), "0.13");
        assert_eq!(Hint::Need(8.125).to_string(), "Need 8.13");
        assert!((round_display(10.125) - 10.13).abs() < 1e-9);
    }

    #[test]
    fn rounds_like_the_display() {
        assert!((round_display(12.345_6) - 12.35).abs() < 1e-9);
        assert!((round_display(3.333_333) - 3.33).abs() < 1e-9);
    }
}
