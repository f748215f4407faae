//! Calc command handler
//!
//! Loads a semester, runs the full recalculation, applies `--set` edits in
//! order and prints the resulting tables.

use super::{load, semester_path};
use mog_tracker::config::Config;
use mog_tracker::core::display::format_field;
use mog_tracker::core::report::row_scores;
use mog_tracker::core::tracker::{BlocView, Cascade, FieldEdit, GradeTracker, SemesterView};
use mog_tracker::{error, verbose};
use std::path::Path;

/// Run the calc command.
///
/// # Arguments
/// * `input_file` - Semester file, or `None` for config `semester_file`
/// * `edits` - Field edits applied after the initial recalculation
/// * `config` - Configuration providing targets and default weights
pub fn run(input_file: Option<&Path>, edits: &[FieldEdit], config: &Config) {
    if let Err(err) = calculate(input_file, edits, config) {
        error!("Calculation failed: {err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn calculate(input_file: Option<&Path>, edits: &[FieldEdit], config: &Config) -> Result<(), String> {
    let path = semester_path(input_file, config)?;
    let semester = load(&path)?;

    let mut tracker = GradeTracker::new(semester, config.targets(), config.default_weights());
    tracker.recompute_all();

    for edit in edits {
        let cascade = tracker
            .apply_edit(edit)
            .map_err(|e| format!("✗ Cannot apply {}.{}: {e}", edit.subject_id, edit.field))?;
        print_cascade(edit, &cascade);
    }

    print_view(&tracker.view());
    Ok(())
}

fn print_cascade(edit: &FieldEdit, cascade: &Cascade) {
    println!(
        "✓ {}.{} = '{}'",
        edit.subject_id, edit.field, cascade.subject.clamped_value(edit.field)
    );
    verbose!(
        "  required final {}, average {}",
        cascade.subject.required_final_display,
        cascade.subject.average_display
    );
    for change in &cascade.subject.elective_changes {
        let state = if change.active { "enabled" } else { "disabled" };
        println!("  elective {} {state}", change.subject_id);
    }
    verbose!(
        "  bloc {}: MOG {}, {}",
        cascade.bloc.bloc_id,
        cascade.bloc.mog_display,
        cascade.bloc.status_display
    );
    verbose!("  overall {}", cascade.semester.overall_display);
}

fn print_bloc(bloc: &BlocView) {
    println!("\n=== {} ===", bloc.name);
    println!(
        "{:<28} {:>5} {:>8} {:>8} {:>14} {:>8}",
        "Subject", "ECTS", "Midterm", "Final", "Required", "Average"
    );
    for row in &bloc.rows {
        let (midterm, final_exam) = row_scores(row);
        let name = if row.active {
            row.name.clone()
        } else {
            format!("{} (disabled)", row.name)
        };
        println!(
            "{name:<28} {:>5} {midterm:>8} {final_exam:>8} {:>14} {:>8}",
            format_field(row.ects),
            row.required_final,
            row.average
        );
    }
    println!("MOG: {}", bloc.outcome.mog_display);
    println!("Need: {}", bloc.outcome.mog_need_display);
    println!("Status: {}", bloc.outcome.status_display);
}

/// Print every bloc table followed by the overall GPA
pub fn print_view(view: &SemesterView) {
    println!("{}", view.name);
    for bloc in &view.blocs {
        print_bloc(bloc);
    }
    println!(
        "\nOverall GPA: {} [{}]",
        view.overall.overall_display, view.overall.color
    );
}
