//! Semester aggregation: ECTS-weighted overall GPA

use super::{BlocResult, BlocStatus, GradingTargets};
use crate::core::display::{format_field, format_grade, round_display, EM_DASH};
use crate::core::models::Bloc;
use std::fmt;

/// What the semester aggregation needs to know about one bloc
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlocSnapshot {
    /// ECTS of the bloc's counted subjects
    pub counted_ects: f64,
    /// Validation status
    pub status: BlocStatus,
    /// Displayed MOG (two decimals), if any subject is graded
    pub mog: Option<f64>,
}

impl BlocSnapshot {
    /// Create a snapshot from raw values
    #[must_use]
    pub const fn new(counted_ects: f64, status: BlocStatus, mog: Option<f64>) -> Self {
        Self {
            counted_ects,
            status,
            mog,
        }
    }

    /// Snapshot a bloc together with its aggregated result
    ///
    /// Counted ECTS are re-scanned from the bloc's active subjects rather
    /// than taken from the result.
    #[must_use]
    pub fn from_result(bloc: &Bloc, result: &BlocResult) -> Self {
        Self::new(
            bloc.counted_ects(),
            result.status,
            result.current_mog.map(round_display),
        )
    }
}

/// Color of the overall GPA cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    /// Semester complete and passed
    Green,
    /// Semester complete and failed
    Red,
    /// Semester partially graded
    Orange,
    /// Nothing to show
    Black,
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Black => "black",
        };
        write!(f, "{name}")
    }
}

/// Overall GPA state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverallGpa {
    /// No bloc has counted credits
    Empty,
    /// Credits are counted but no bloc is resolved
    NoneCompleted,
    /// Some blocs are resolved
    Partial {
        /// GPA over resolved blocs
        gpa: f64,
        /// ECTS of resolved blocs
        completed_ects: f64,
        /// ECTS counted over the whole semester
        total_ects: f64,
    },
    /// Every bloc with credits is resolved
    Complete(f64),
}

impl OverallGpa {
    /// GPA value, when at least one bloc is resolved
    #[must_use]
    pub const fn gpa(&self) -> Option<f64> {
        match self {
            Self::Partial { gpa, .. } | Self::Complete(gpa) => Some(*gpa),
            Self::Empty | Self::NoneCompleted => None,
        }
    }
}

impl fmt::Display for OverallGpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty | Self::NoneCompleted => write!(f, "{EM_DASH}"),
            Self::Partial {
                gpa,
                completed_ects,
                total_ects,
            } => write!(
                f,
                "{} ({}/{} ECTS complete)",
                format_grade(*gpa),
                format_field(*completed_ects),
                format_field(*total_ects)
            ),
            Self::Complete(gpa) => write!(f, "{}", format_grade(*gpa)),
        }
    }
}

/// Outcome of the semester aggregation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallResult {
    /// GPA state
    pub state: OverallGpa,
    /// Cell color
    pub color: ColorTag,
}

impl OverallResult {
    /// Text of the overall GPA cell
    #[must_use]
    pub fn display(&self) -> String {
        self.state.to_string()
    }
}

/// Aggregates bloc MOGs into the semester GPA
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverallAggregator {
    targets: GradingTargets,
}

impl OverallAggregator {
    /// Create an aggregator for the given targets
    #[must_use]
    pub const fn new(targets: GradingTargets) -> Self {
        Self { targets }
    }

    /// Aggregate the semester from snapshots of its blocs
    ///
    /// Only resolved blocs (validated or not) contribute to the GPA, each
    /// weighted by its counted ECTS.
    #[must_use]
    pub fn aggregate(&self, blocs: &[BlocSnapshot]) -> OverallResult {
        let mut total_ects = 0.0;
        let mut completed_ects = 0.0;
        let mut weighted_mog = 0.0;
        let mut pending_blocs = 0_usize;

        for bloc in blocs {
            total_ects += bloc.counted_ects;
            match bloc.mog {
                Some(mog) if bloc.status.is_resolved() && bloc.counted_ects > 0.0 => {
                    weighted_mog += mog * bloc.counted_ects;
                    completed_ects += bloc.counted_ects;
                }
                _ if bloc.counted_ects > 0.0 => pending_blocs += 1,
                _ => {}
            }
        }

        if total_ects <= 0.0 {
            return OverallResult {
                state: OverallGpa::Empty,
                color: ColorTag::Black,
            };
        }

        if pending_blocs == 0 {
            let gpa = weighted_mog / completed_ects;
            let color = if gpa >= self.targets.target_mog {
                ColorTag::Green
            } else {
                ColorTag::Red
            };
            OverallResult {
                state: OverallGpa::Complete(gpa),
                color,
            }
        } else if completed_ects > 0.0 {
            OverallResult {
                state: OverallGpa::Partial {
                    gpa: weighted_mog / completed_ects,
                    completed_ects,
                    total_ects,
                },
                color: ColorTag::Orange,
            }
        } else {
            OverallResult {
                state: OverallGpa::NoneCompleted,
                color: ColorTag::Black,
            }
        }
    }
}
