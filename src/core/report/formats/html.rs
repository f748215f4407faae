//! HTML report generator
//!
//! Generates a self-contained HTML page (embedded CSS) from the askama
//! template `templates/semester_report.html`.

use crate::core::display::format_field;
use crate::core::get_version;
use crate::core::report::{row_scores, status_class, ReportContext, ReportGenerator};
use crate::core::tracker::BlocView;
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// One subject row as rendered in the page
struct HtmlRow {
    name: String,
    ects: String,
    midterm: String,
    final_exam: String,
    required_final: String,
    average: String,
    row_class: &'static str,
}

/// One bloc table as rendered in the page
struct HtmlBloc {
    name: String,
    rows: Vec<HtmlRow>,
    mog: String,
    need: String,
    status: String,
    status_class: &'static str,
}

impl HtmlBloc {
    fn from_view(bloc: &BlocView) -> Self {
        let rows = bloc
            .rows
            .iter()
            .map(|row| {
                let (midterm, final_exam) = row_scores(row);
                HtmlRow {
                    name: row.name.clone(),
                    ects: format_field(row.ects),
                    midterm: midterm.to_string(),
                    final_exam: final_exam.to_string(),
                    required_final: row.required_final.clone(),
                    average: row.average.clone(),
                    row_class: if row.active { "active" } else { "inactive" },
                }
            })
            .collect();

        Self {
            name: bloc.name.clone(),
            rows,
            mog: bloc.outcome.mog_display.clone(),
            need: bloc.outcome.mog_need_display.clone(),
            status: bloc.outcome.status_display.clone(),
            status_class: status_class(bloc.outcome.result.status),
        }
    }
}

#[derive(Template)]
#[template(path = "semester_report.html")]
struct SemesterReportTemplate {
    semester_name: String,
    passing_grade: String,
    target_mog: String,
    counted_ects: String,
    subject_count: usize,
    blocs: Vec<HtmlBloc>,
    overall: String,
    overall_color: String,
    version: String,
}

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_template(ctx: &ReportContext) -> SemesterReportTemplate {
        SemesterReportTemplate {
            semester_name: ctx.semester_name().to_string(),
            passing_grade: format_field(ctx.targets.passing_grade),
            target_mog: format_field(ctx.targets.target_mog),
            counted_ects: format_field(ctx.counted_ects()),
            subject_count: ctx.subject_count(),
            blocs: ctx.blocs().iter().map(HtmlBloc::from_view).collect(),
            overall: ctx.view.overall.overall_display.clone(),
            overall_color: ctx.view.overall.color.to_string(),
            version: get_version().to_string(),
        }
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::build_template(ctx).render()?)
    }
}
