//! Markdown report generator
//!
//! Generates semester reports in Markdown: one table per bloc followed by the
//! bloc summary, then the overall GPA.

use crate::core::display::format_field;
use crate::core::get_version;
use crate::core::report::{row_scores, ReportContext, ReportGenerator};
use crate::core::tracker::BlocView;
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let blocs: String = ctx.blocs().iter().map(Self::generate_bloc_section).collect();
        let values = [
            ("semester_name", ctx.semester_name().to_string()),
            ("subject_count", ctx.subject_count().to_string()),
            ("counted_ects", format_field(ctx.counted_ects())),
            ("passing_grade", format_field(ctx.targets.passing_grade)),
            ("target_mog", format_field(ctx.targets.target_mog)),
            ("blocs", blocs),
            ("overall", ctx.view.overall.overall_display.clone()),
            ("overall_color", ctx.view.overall.color.to_string()),
            ("version", get_version().to_string()),
        ];
        fill_placeholders(MARKDOWN_TEMPLATE, &values)
    }

    /// Generate the table and summary lines of one bloc
    fn generate_bloc_section(bloc: &BlocView) -> String {
        let mut section = String::new();

        let _ = writeln!(section, "## {}\n", bloc.name);
        let _ = writeln!(
            section,
            "| Subject | ECTS | Midterm | Final | Required final | Average |"
        );
        let _ = writeln!(
            section,
            "|---------|------|---------|-------|----------------|---------|"
        );

        for row in &bloc.rows {
            let (midterm, final_exam) = row_scores(row);
            let name = if row.active {
                row.name.clone()
            } else {
                format!("~~{}~~", row.name)
            };
            let _ = writeln!(
                section,
                "| {name} | {} | {midterm} | {final_exam} | {} | {} |",
                format_field(row.ects),
                row.required_final,
                row.average
            );
        }

        let _ = writeln!(section);
        let _ = writeln!(section, "- **MOG:** {}", bloc.outcome.mog_display);
        let _ = writeln!(section, "- **Need:** {}", bloc.outcome.mog_need_display);
        let _ = writeln!(section, "- **Status:** {}", bloc.outcome.status_display);
        let _ = writeln!(section);

        section
    }
}

/// Replace each `{{key}}` of `template` with its value in one pass.
///
/// Substituted text is never scanned again, so names containing `{{...}}`
/// come out verbatim. Unknown keys are left as they are.
fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };
        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    output.push_str(rest);
    output
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
