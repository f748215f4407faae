//! Report command handler
//!
//! Generates semester grade reports in Markdown or HTML.

use super::{load, semester_path};
use mog_tracker::config::Config;
use mog_tracker::core::report::{
    formats::ReportFormat, HtmlReporter, MarkdownReporter, ReportContext, ReportGenerator,
};
use mog_tracker::core::tracker::{GradeTracker, SemesterView};
use mog_tracker::{error, info};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Semester file, or `None` for config `semester_file`
/// * `output_file` - Optional output path
/// * `format_str` - Report format (markdown, html)
/// * `config` - Configuration containing targets and the default reports directory
pub fn run(input_file: Option<&Path>, output_file: Option<&Path>, format_str: &str, config: &Config) {
    if let Err(err) = generate_report(input_file, output_file, format_str, config) {
        error!("Report generation failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Write the report to a file in the specified format
fn write_report(ctx: &ReportContext, format: ReportFormat, output_path: &Path) -> Result<(), String> {
    match format {
        ReportFormat::Markdown => MarkdownReporter::new()
            .generate(ctx, output_path)
            .map_err(|e| format!("✗ Failed to generate Markdown report: {e}")),
        ReportFormat::Html => HtmlReporter::new()
            .generate(ctx, output_path)
            .map_err(|e| format!("✗ Failed to generate HTML report: {e}")),
    }
}

/// Print a summary of the report
fn print_summary(view: &SemesterView) {
    println!("\n=== Summary ===");
    println!("Semester: {}", view.name);
    for bloc in &view.blocs {
        println!(
            "{}: {} ({})",
            bloc.name, bloc.outcome.mog_display, bloc.outcome.status_display
        );
    }
    println!("Overall GPA: {}", view.overall.overall_display);
}

/// Default output path: `{reports_dir}/{stem}_report.{ext}`
fn default_output_path(
    input_file: &Path,
    format: ReportFormat,
    config: &Config,
) -> Result<PathBuf, String> {
    let reports_dir = PathBuf::from(&config.paths.reports_dir);
    std::fs::create_dir_all(&reports_dir).map_err(|e| {
        format!(
            "✗ Failed to create reports directory {}: {e}",
            reports_dir.display()
        )
    })?;

    let filename = input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("semester")
        .to_string();
    Ok(reports_dir.join(format!("{filename}_report.{}", format.extension())))
}

fn generate_report(
    input_file: Option<&Path>,
    output_file: Option<&Path>,
    format_str: &str,
    config: &Config,
) -> Result<(), String> {
    let format = ReportFormat::from_str(format_str)
        .map_err(|e| format!("✗ {e}. Use: markdown or html"))?;

    let path = semester_path(input_file, config)?;
    let semester = load(&path)?;

    let targets = config.targets();
    let mut tracker = GradeTracker::new(semester, targets, config.default_weights());
    let view = tracker.recompute_all();

    let output_path = match output_file {
        Some(output) => output.to_path_buf(),
        None => default_output_path(&path, format, config)?,
    };

    let ctx = ReportContext::new(&view, targets);
    write_report(&ctx, format, &output_path)?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());

    print_summary(&view);
    Ok(())
}
