//! Recalculation pipeline
//!
//! [`GradeTracker`] owns the current field state of a semester and exposes the
//! three entry points the UI layer calls: subject changed, bloc recompute and
//! semester recompute. Each stage reads a fresh snapshot of the stage below,
//! so re-running the cascade with unchanged fields gives identical output.

use crate::core::electives::{apply_exclusivity, ElectiveChange};
use crate::core::engine::{
    BlocAggregator, BlocResult, BlocSnapshot, ColorTag, GradingTargets, OverallAggregator,
    OverallResult, SubjectCalculator, SubjectResult, SubjectSnapshot,
};
use crate::core::models::{Bloc, ScoreField, Semester, Weights};
use crate::{debug, info};
use std::str::FromStr;

/// One edit of a score field, written `SUBJECT.FIELD=VALUE` (e.g. `algo.midterm=12`)
///
/// An empty value clears the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    /// Edited subject
    pub subject_id: String,
    /// Edited field
    pub field: ScoreField,
    /// New field text
    pub value: String,
}

impl FromStr for FieldEdit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (target, value) = s
            .split_once('=')
            .ok_or_else(|| format!("Invalid edit '{s}': expected SUBJECT.FIELD=VALUE"))?;
        let (subject_id, field) = target
            .trim()
            .rsplit_once('.')
            .ok_or_else(|| format!("Invalid edit '{s}': expected SUBJECT.FIELD=VALUE"))?;
        if subject_id.is_empty() {
            return Err(format!("Invalid edit '{s}': missing subject id"));
        }
        Ok(Self {
            subject_id: subject_id.to_string(),
            field: field.parse()?,
            value: value.trim().to_string(),
        })
    }
}

/// Output of the subject stage
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOutcome {
    /// Subject id
    pub subject_id: String,
    /// Midterm field text after clamping
    pub clamped_midterm: String,
    /// Final field text after clamping
    pub clamped_final: String,
    /// Text of the "required final" cell
    pub required_final_display: String,
    /// Text of the "average" cell
    pub average_display: String,
    /// Electives switched on or off before the calculation
    pub elective_changes: Vec<ElectiveChange>,
    /// Structured result
    pub result: SubjectResult,
}

impl SubjectOutcome {
    /// Field text after clamping
    #[must_use]
    pub fn clamped_value(&self, field: ScoreField) -> &str {
        match field {
            ScoreField::Midterm => &self.clamped_midterm,
            ScoreField::Final => &self.clamped_final,
        }
    }
}

/// Output of the bloc stage
#[derive(Debug, Clone, PartialEq)]
pub struct BlocOutcome {
    /// Bloc id
    pub bloc_id: String,
    /// Text of the MOG cell
    pub mog_display: String,
    /// Text of the MOG-need cell
    pub mog_need_display: String,
    /// Text of the result cell
    pub status_display: String,
    /// Structured result
    pub result: BlocResult,
}

/// Output of the semester stage
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterOutcome {
    /// Text of the overall GPA cell
    pub overall_display: String,
    /// Color of the overall GPA cell
    pub color: ColorTag,
    /// Structured result
    pub result: OverallResult,
}

/// Everything one field edit recomputed
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    /// Subject stage
    pub subject: SubjectOutcome,
    /// Bloc stage
    pub bloc: BlocOutcome,
    /// Semester stage
    pub semester: SemesterOutcome,
}

/// One row of a bloc table
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectRow {
    /// Subject id
    pub id: String,
    /// Subject name
    pub name: String,
    /// ECTS credits
    pub ects: f64,
    /// Whether the subject counts toward its bloc
    pub active: bool,
    /// Midterm field text
    pub midterm: String,
    /// Final field text
    pub final_exam: String,
    /// Text of the "required final" cell
    pub required_final: String,
    /// Text of the "average" cell
    pub average: String,
}

/// A bloc with its rows and computed cells
#[derive(Debug, Clone, PartialEq)]
pub struct BlocView {
    /// Bloc id
    pub id: String,
    /// Bloc name
    pub name: String,
    /// Subject rows
    pub rows: Vec<SubjectRow>,
    /// Computed cells
    pub outcome: BlocOutcome,
}

/// The whole semester as the interface would show it
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterView {
    /// Semester name
    pub name: String,
    /// Bloc tables
    pub blocs: Vec<BlocView>,
    /// Overall GPA cell
    pub overall: SemesterOutcome,
}

/// Owns a semester's field state and runs the recalculation cascade
#[derive(Debug, Clone)]
pub struct GradeTracker {
    semester: Semester,
    subjects: SubjectCalculator,
    blocs: BlocAggregator,
    overall: OverallAggregator,
}

impl GradeTracker {
    /// Create a tracker over a semester
    ///
    /// # Arguments
    /// * `semester` - Current field state
    /// * `targets` - Passing grade and target MOG
    /// * `default_weights` - Weights for subjects without an explicit pair
    #[must_use]
    pub const fn new(semester: Semester, targets: GradingTargets, default_weights: Weights) -> Self {
        Self {
            semester,
            subjects: SubjectCalculator::new(targets, default_weights),
            blocs: BlocAggregator::new(targets),
            overall: OverallAggregator::new(targets),
        }
    }

    /// Current field state
    #[must_use]
    pub const fn semester(&self) -> &Semester {
        &self.semester
    }

    /// Give back the field state
    #[must_use]
    pub fn into_semester(self) -> Semester {
        self.semester
    }

    /// Subject stage: apply the elective rule of the subject's bloc, clamp
    /// the subject's scores into its fields and compute its cells.
    ///
    /// The caller runs [`Self::on_module_recompute`] next.
    ///
    /// # Errors
    /// Returns an error if no bloc contains the subject.
    pub fn on_subject_changed(&mut self, subject_id: &str) -> Result<SubjectOutcome, String> {
        let calculator = self.subjects;
        let (bloc, index) = self
            .semester
            .blocs
            .iter_mut()
            .find_map(|bloc| {
                let index = bloc.subjects.iter().position(|s| s.id == subject_id)?;
                Some((bloc, index))
            })
            .ok_or_else(|| format!("Unknown subject: '{subject_id}'"))?;
        Ok(Self::subject_stage(calculator, bloc, index))
    }

    /// Bloc stage: aggregate the bloc from the current subject fields.
    ///
    /// # Errors
    /// Returns an error if the bloc does not exist.
    pub fn on_module_recompute(&self, bloc_id: &str) -> Result<BlocOutcome, String> {
        let bloc = self
            .semester
            .bloc(bloc_id)
            .ok_or_else(|| format!("Unknown bloc: '{bloc_id}'"))?;
        let outcome = self.bloc_outcome(bloc);
        debug!(
            "Bloc '{bloc_id}': MOG {}, status {}",
            outcome.mog_display, outcome.status_display
        );
        Ok(outcome)
    }

    /// Semester stage: aggregate every bloc into the overall GPA.
    #[must_use]
    pub fn on_semester_recompute(&self) -> SemesterOutcome {
        let snapshots: Vec<BlocSnapshot> = self
            .semester
            .blocs
            .iter()
            .map(|bloc| BlocSnapshot::from_result(bloc, &self.aggregate_bloc(bloc)))
            .collect();
        let result = self.overall.aggregate(&snapshots);
        debug!("Semester: overall {} ({})", result.display(), result.color);
        SemesterOutcome {
            overall_display: result.display(),
            color: result.color,
            result,
        }
    }

    /// Set one field and run the full cascade for it
    ///
    /// # Errors
    /// Returns an error if the subject does not exist.
    pub fn apply_edit(&mut self, edit: &FieldEdit) -> Result<Cascade, String> {
        let subject = self
            .semester
            .subject_mut(&edit.subject_id)
            .ok_or_else(|| format!("Unknown subject: '{}'", edit.subject_id))?;
        if !subject.active {
            return Err(format!(
                "Subject '{}' is a disabled elective; clear the other elective first",
                edit.subject_id
            ));
        }
        subject.set_field(edit.field, edit.value.clone());
        debug!(
            "Edit {}.{} = '{}'",
            edit.subject_id, edit.field, edit.value
        );

        let subject = self.on_subject_changed(&edit.subject_id)?;
        let bloc_id = self
            .semester
            .bloc_of(&edit.subject_id)
            .map(str::to_string)
            .ok_or_else(|| format!("Unknown subject: '{}'", edit.subject_id))?;
        let bloc = self.on_module_recompute(&bloc_id)?;
        let semester = self.on_semester_recompute();

        Ok(Cascade {
            subject,
            bloc,
            semester,
        })
    }

    /// Initial load: run the subject stage for every subject, then every
    /// bloc, then the semester.
    pub fn recompute_all(&mut self) -> SemesterView {
        let calculator = self.subjects;
        for bloc in &mut self.semester.blocs {
            for index in 0..bloc.subjects.len() {
                Self::subject_stage(calculator, bloc, index);
            }
        }
        self.view()
    }

    /// Compute every cell from the current fields without modifying them
    #[must_use]
    pub fn view(&self) -> SemesterView {
        let blocs = self
            .semester
            .blocs
            .iter()
            .map(|bloc| BlocView {
                id: bloc.id.clone(),
                name: bloc.name.clone(),
                rows: bloc
                    .subjects
                    .iter()
                    .map(|subject| {
                        let result = self.subjects.evaluate(subject);
                        SubjectRow {
                            id: subject.id.clone(),
                            name: subject.name.clone(),
                            ects: subject.ects,
                            active: subject.active,
                            midterm: subject.midterm.clone(),
                            final_exam: subject.final_exam.clone(),
                            required_final: result.required_final_display(),
                            average: result.average_display(),
                        }
                    })
                    .collect(),
                outcome: self.bloc_outcome(bloc),
            })
            .collect();

        SemesterView {
            name: self.semester.name.clone(),
            blocs,
            overall: self.on_semester_recompute(),
        }
    }

    /// Subject stage for the subject at `index` in `bloc`
    fn subject_stage(calculator: SubjectCalculator, bloc: &mut Bloc, index: usize) -> SubjectOutcome {
        let elective_changes = if bloc.exclusive.is_empty() {
            Vec::new()
        } else {
            apply_exclusivity(bloc)
        };
        for change in &elective_changes {
            let state = if change.active { "enabled" } else { "disabled" };
            info!("Elective '{}' {state} in bloc '{}'", change.subject_id, bloc.id);
        }

        let subject = &mut bloc.subjects[index];
        let result = calculator.update(subject);

        let outcome = SubjectOutcome {
            subject_id: subject.id.clone(),
            clamped_midterm: subject.midterm.clone(),
            clamped_final: subject.final_exam.clone(),
            required_final_display: result.required_final_display(),
            average_display: result.average_display(),
            elective_changes,
            result,
        };
        debug!(
            "Subject '{}': required final {}, average {}",
            outcome.subject_id, outcome.required_final_display, outcome.average_display
        );
        outcome
    }

    fn aggregate_bloc(&self, bloc: &Bloc) -> BlocResult {
        let snapshots: Vec<SubjectSnapshot> = bloc
            .subjects
            .iter()
            .map(|subject| SubjectSnapshot::from_result(subject, &self.subjects.evaluate(subject)))
            .collect();
        self.blocs.aggregate(&snapshots)
    }

    fn bloc_outcome(&self, bloc: &Bloc) -> BlocOutcome {
        let result = self.aggregate_bloc(bloc);
        BlocOutcome {
            bloc_id: bloc.id.clone(),
            mog_display: result.mog_display(),
            mog_need_display: result.mog_need_display(),
            status_display: result.status_display(),
            result,
        }
    }
}
