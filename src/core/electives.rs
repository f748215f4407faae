//! Elective exclusivity rule
//!
//! Two electives of a bloc may be declared mutually exclusive: once a score is
//! entered for one of them, the other is deactivated and blanked. Clearing
//! both brings them back. The engine only reads the resulting `active` flags.

use crate::core::models::{Bloc, Subject};

/// A change of `active` state made by the rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectiveChange {
    /// Subject whose state changed
    pub subject_id: String,
    /// New `active` value
    pub active: bool,
}

/// Apply the exclusivity rule to every exclusive pair of a bloc
///
/// For each pair:
/// - only one subject has input: the other is deactivated and its scores cleared
/// - neither has input: both are activated
/// - both have input: nothing changes
///
/// Pairs naming unknown subjects are skipped.
///
/// # Returns
/// The subjects whose `active` flag changed
pub fn apply_exclusivity(bloc: &mut Bloc) -> Vec<ElectiveChange> {
    let mut changes = Vec::new();
    let pairs = bloc.exclusive.clone();

    for (first, second) in &pairs {
        let (Some(first_filled), Some(second_filled)) = (
            bloc.subject(first).map(Subject::has_input),
            bloc.subject(second).map(Subject::has_input),
        ) else {
            continue;
        };

        match (first_filled, second_filled) {
            (true, false) => deactivate(bloc, second, &mut changes),
            (false, true) => deactivate(bloc, first, &mut changes),
            (false, false) => {
                activate(bloc, first, &mut changes);
                activate(bloc, second, &mut changes);
            }
            (true, true) => {}
        }
    }

    changes
}

fn deactivate(bloc: &mut Bloc, id: &str, changes: &mut Vec<ElectiveChange>) {
    if let Some(subject) = bloc.subject_mut(id) {
        subject.clear_scores();
        if subject.active {
            subject.active = false;
            changes.push(ElectiveChange {
                subject_id: id.to_string(),
                active: false,
            });
        }
    }
}

fn activate(bloc: &mut Bloc, id: &str, changes: &mut Vec<ElectiveChange>) {
    if let Some(subject) = bloc.subject_mut(id) {
        if !subject.active {
            subject.active = true;
            changes.push(ElectiveChange {
                subject_id: id.to_string(),
                active: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ScoreField;

    fn languages() -> Bloc {
        let mut bloc = Bloc::new("bloc-4".to_string(), "Languages".to_string());
        bloc.add_subject(Subject::new("spanish".to_string(), "Spanish".to_string(), 2.0));
        bloc.add_subject(Subject::new("german".to_string(), "German".to_string(), 2.0));
        bloc.add_exclusive_pair("spanish".to_string(), "german".to_string());
        bloc
    }

    fn active(bloc: &Bloc, id: &str) -> bool {
        bloc.subject(id).is_some_and(|s| s.active)
    }

    #[test]
    fn entering_one_elective_disables_the_other() {
        let mut bloc = languages();
        if let Some(spanish) = bloc.subject_mut("spanish") {
            spanish.set_field(ScoreField::Midterm, "12".to_string());
        }

        let changes = apply_exclusivity(&mut bloc);
        assert_eq!(
            changes,
            vec![ElectiveChange {
                subject_id: "german".to_string(),
                active: false
            }]
        );
        assert!(active(&bloc, "spanish"));
        assert!(!active(&bloc, "german"));
        assert!((bloc.counted_ects() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clearing_both_enables_both() {
        let mut bloc = languages();
        if let Some(german) = bloc.subject_mut("german") {
            german.set_field(ScoreField::Final, "9".to_string());
        }
        apply_exclusivity(&mut bloc);
        assert!(!active(&bloc, "spanish"));

        if let Some(german) = bloc.subject_mut("german") {
            german.clear_scores();
        }
        let changes = apply_exclusivity(&mut bloc);
        assert_eq!(changes.len(), 1);
        assert!(active(&bloc, "spanish"));
        assert!(active(&bloc, "german"));
    }

    #[test]
    fn both_filled_leaves_state_alone() {
        let mut bloc = languages();
        for id in ["spanish", "german"] {
            if let Some(s) = bloc.subject_mut(id) {
                s.set_field(ScoreField::Midterm, "11".to_string());
            }
        }
        assert!(apply_exclusivity(&mut bloc).is_empty());
        assert!(active(&bloc, "spanish"));
        assert!(active(&bloc, "german"));
    }

    #[test]
    fn unknown_pair_is_skipped() {
        let mut bloc = languages();
        bloc.add_exclusive_pair("latin".to_string(), "greek".to_string());
        assert!(apply_exclusivity(&mut bloc).is_empty());
    }

    #[test]
    fn disabled_elective_is_blanked() {
        let mut bloc = languages();
        if let Some(german) = bloc.subject_mut("german") {
            german.active = false;
            german.midterm = "   ".to_string();
        }
        if let Some(spanish) = bloc.subject_mut("spanish") {
            spanish.set_field(ScoreField::Midterm, "15".to_string());
        }
        apply_exclusivity(&mut bloc);
        assert_eq!(bloc.subject("german").map(|s| s.midterm.as_str()), Some(""));
    }
}
