//! Report generation module for semester grades
//!
//! Renders a computed [`SemesterView`] as a Markdown or HTML document: one
//! table per bloc with the required-final and average cells, the bloc MOG,
//! its need hint and status, and the overall GPA.

pub mod formats;

use crate::core::display::EM_DASH;
use crate::core::engine::{BlocStatus, GradingTargets};
use crate::core::tracker::{BlocView, SemesterView, SubjectRow};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Computed semester view
    pub view: &'a SemesterView,
    /// Targets the view was computed with
    pub targets: GradingTargets,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(view: &'a SemesterView, targets: GradingTargets) -> Self {
        Self { view, targets }
    }

    /// Semester name
    #[must_use]
    pub fn semester_name(&self) -> &str {
        &self.view.name
    }

    /// Sum of counted ECTS over all blocs
    #[must_use]
    pub fn counted_ects(&self) -> f64 {
        self.view
            .blocs
            .iter()
            .map(|bloc| bloc.outcome.result.counted_ects)
            .sum()
    }

    /// Number of subjects across all blocs
    #[must_use]
    pub fn subject_count(&self) -> usize {
        self.view.blocs.iter().map(|bloc| bloc.rows.len()).sum()
    }

    /// Blocs of the semester, in file order
    #[must_use]
    pub fn blocs(&self) -> &'a [BlocView] {
        &self.view.blocs
    }
}

/// Score cell text, with a dash for a blank field
#[must_use]
pub fn score_cell(text: &str) -> &str {
    if text.trim().is_empty() {
        EM_DASH
    } else {
        text
    }
}

/// Score cells of a row, blanked for a disabled elective
#[must_use]
pub fn row_scores(row: &SubjectRow) -> (&str, &str) {
    if row.active {
        (score_cell(&row.midterm), score_cell(&row.final_exam))
    } else {
        (EM_DASH, EM_DASH)
    }
}

/// CSS class of a bloc status cell
#[must_use]
pub const fn status_class(status: BlocStatus) -> &'static str {
    match status {
        BlocStatus::Validated => "validated",
        BlocStatus::NotValidated => "not-validated",
        BlocStatus::InProgress => "in-progress",
        BlocStatus::NoActiveSubjects => "empty",
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(active: bool, midterm: &str) -> SubjectRow {
        SubjectRow {
            id: "x".to_string(),
            name: "X".to_string(),
            ects: 2.0,
            active,
            midterm: midterm.to_string(),
            final_exam: String::new(),
            required_final: String::new(),
            average: String::new(),
        }
    }

    #[test]
    fn blank_scores_render_as_dash() {
        assert_eq!(row_scores(&row(true, "12")), ("12", "—"));
        assert_eq!(row_scores(&row(true, "  ")), ("—", "—"));
    }

    #[test]
    fn disabled_row_hides_scores() {
        assert_eq!(row_scores(&row(false, "12")), ("—", "—"));
    }

    #[test]
    fn status_classes() {
        assert_eq!(status_class(BlocStatus::Validated), "validated");
        assert_eq!(status_class(BlocStatus::NotValidated), "not-validated");
    }
}
