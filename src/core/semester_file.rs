//! Semester file loader
//!
//! A semester is described in TOML: blocs, their subjects with ECTS and
//! optional weights, the current score fields and exclusive elective pairs.

use crate::core::models::Semester;
use crate::warn;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Parse a semester file
///
/// # Arguments
/// * `path` - Path to the TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, is not valid TOML, or fails
/// validation (see [`parse_semester_toml`]).
pub fn load_semester<P: AsRef<Path>>(path: P) -> Result<Semester, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_semester_toml(&content)
}

/// Parse a semester from a TOML string
///
/// # Errors
/// Returns an error if the TOML does not match the semester schema, if two
/// subjects share an id, if an ECTS value is infinite or `nan`, or if an
/// exclusive pair names a subject outside its bloc.
pub fn parse_semester_toml(toml_str: &str) -> Result<Semester, Box<dyn Error>> {
    let semester: Semester = toml::from_str(toml_str)?;
    validate_semester(&semester)?;
    Ok(semester)
}

/// Check the structural rules of a semester
///
/// Negative ECTS are accepted with a warning; such subjects never count.
///
/// # Errors
/// Returns a description of the first violated rule.
pub fn validate_semester(semester: &Semester) -> Result<(), String> {
    let mut seen_blocs: HashSet<&str> = HashSet::new();
    let mut seen_subjects: HashSet<&str> = HashSet::new();

    for bloc in &semester.blocs {
        if !seen_blocs.insert(bloc.id.as_str()) {
            return Err(format!("Duplicate bloc id: '{}'", bloc.id));
        }

        for subject in &bloc.subjects {
            if !seen_subjects.insert(subject.id.as_str()) {
                return Err(format!("Duplicate subject id: '{}'", subject.id));
            }
            if !subject.ects.is_finite() {
                return Err(format!(
                    "Subject '{}' has a non-finite ECTS value ({})",
                    subject.id, subject.ects
                ));
            }
            if subject.ects < 0.0 {
                warn!(
                    "Subject '{}' has negative ECTS ({}); it will not count",
                    subject.id, subject.ects
                );
            }
        }

        for (first, second) in &bloc.exclusive {
            for id in [first, second] {
                if bloc.subject(id).is_none() {
                    return Err(format!(
                        "Exclusive pair in bloc '{}' names unknown subject '{id}'",
                        bloc.id
                    ));
                }
            }
            if first == second {
                return Err(format!(
                    "Exclusive pair in bloc '{}' repeats subject '{first}'",
                    bloc.id
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
name = "Semester 5"

[[blocs]]
id = "core"
name = "Core"

[[blocs.subjects]]
id = "algo"
name = "Algorithms"
ects = 5
midterm = 12
final = "14.5"

[[blocs.subjects]]
id = "net"
name = "Networks"
ects = 4.5
midterm_weight = 0.5
final_weight = 0.5

[[blocs]]
id = "langs"
name = "Languages"
exclusive = [["spanish", "german"]]

[[blocs.subjects]]
id = "spanish"
name = "Spanish"
ects = 2

[[blocs.subjects]]
id = "german"
name = "German"
ects = 2
"#;

    #[test]
    fn parses_sample_semester() {
        let semester = parse_semester_toml(SAMPLE).expect("parse sample");
        assert_eq!(semester.name, "Semester 5");
        assert_eq!(semester.blocs.len(), 2);

        let algo = semester.subject("algo").expect("algo");
        assert_eq!(algo.midterm, "12");
        assert_eq!(algo.final_exam, "14.5");
        assert!((algo.ects - 5.0).abs() < f64::EPSILON);
        assert!(algo.active);

        let net = semester.subject("net").expect("net");
        assert!(net.midterm.is_empty());
        assert!(net.explicit_weights().is_some());

        let langs = semester.bloc("langs").expect("langs");
        assert_eq!(
            langs.exclusive,
            vec![("spanish".to_string(), "german".to_string())]
        );
    }

    #[test]
    fn rejects_duplicate_subject_ids() {
        let toml_str = r#"
name = "S"
[[blocs]]
id = "a"
name = "A"
[[blocs.subjects]]
id = "x"
name = "X"
ects = 1
[[blocs]]
id = "b"
name = "B"
[[blocs.subjects]]
id = "x"
name = "X again"
ects = 1
"#;
        let err = parse_semester_toml(toml_str).expect_err("duplicate");
        assert!(err.to_string().contains("Duplicate subject id"));
    }

    #[test]
    fn rejects_pair_outside_bloc() {
        let toml_str = r#"
name = "S"
[[blocs]]
id = "a"
name = "A"
exclusive = [["x", "y"]]
[[blocs.subjects]]
id = "x"
name = "X"
ects = 1
"#;
        let err = parse_semester_toml(toml_str).expect_err("unknown pair member");
        assert!(err.to_string().contains("unknown subject 'y'"));
    }

    #[test]
    fn rejects_non_finite_ects() {
        for ects in ["inf", "-inf", "nan"] {
            let toml_str = format!(
                "name = \"S\"\n[[blocs]]\nid = \"a\"\nname = \"A\"\n[[blocs.subjects]]\nid = \"x\"\nname = \"X\"\nects = {ects}\n"
            );
            let err = parse_semester_toml(&toml_str).expect_err("non-finite ects");
            assert!(err.to_string().contains("non-finite ECTS"), "{ects}: {err}");
        }
    }

    #[test]
    fn infinite_scores_load_as_absent() {
        let toml_str = r#"
name = "S"
[[blocs]]
id = "a"
name = "A"
[[blocs.subjects]]
id = "x"
name = "X"
ects = 3
midterm = inf
final = "infinity"
"#;
        let semester = parse_semester_toml(toml_str).expect("parse");
        let subject = semester.subject("x").expect("x");
        assert!(subject.midterm_score().is_none());
        assert!(subject.final_score().is_none());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(parse_semester_toml("name = ").is_err());
        assert!(parse_semester_toml("[[blocs]]\nname = \"no id\"").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_semester("does/not/exist.toml").is_err());
    }
}
