//! Subject model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Midterm/final weighting of a subject
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Weight of the midterm score
    pub midterm: f64,
    /// Weight of the final-exam score
    #[serde(rename = "final")]
    pub final_exam: f64,
}

impl Weights {
    /// Create a weight pair. The sum is not checked.
    #[must_use]
    pub const fn new(midterm: f64, final_exam: f64) -> Self {
        Self {
            midterm,
            final_exam,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::new(0.4, 0.6)
    }
}

/// Editable score fields of a subject row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreField {
    /// Midterm score input
    Midterm,
    /// Final-exam score input
    Final,
}

impl FromStr for ScoreField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "midterm" | "mid" => Ok(Self::Midterm),
            "final" | "exam" => Ok(Self::Final),
            other => Err(format!("Unknown score field: '{other}' (expected midterm or final)")),
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Midterm => write!(f, "midterm"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// Parse the text of a form field as a number.
///
/// Blank, unparsable, `NaN` and infinite values are all absent.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Represents one graded subject of a bloc
///
/// Scores and weights are kept as the raw text of their fields; the engine
/// decides whether a value is present by parsing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier (e.g., "spanish")
    pub id: String,

    /// Display name (e.g., "Spanish")
    pub name: String,

    /// ECTS credits (can be fractional)
    #[serde(default)]
    pub ects: f64,

    /// Midterm field text
    #[serde(default, deserialize_with = "field_text")]
    pub midterm: String,

    /// Final-exam field text
    #[serde(default, rename = "final", deserialize_with = "field_text")]
    pub final_exam: String,

    /// Explicit midterm weight text
    #[serde(default, deserialize_with = "field_text")]
    pub midterm_weight: String,

    /// Explicit final weight text
    #[serde(default, deserialize_with = "field_text")]
    pub final_weight: String,

    /// Whether the subject counts toward its bloc (false for a deselected elective)
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Accept either a TOML number or a string for a field value.
fn field_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawField {
        Number(f64),
        Text(String),
    }

    Ok(match RawField::deserialize(deserializer)? {
        RawField::Number(value) => value.to_string(),
        RawField::Text(text) => text,
    })
}

impl Subject {
    /// Create a new active subject with empty score fields
    ///
    /// # Arguments
    /// * `id` - Unique subject id
    /// * `name` - Display name
    /// * `ects` - ECTS credits
    #[must_use]
    pub const fn new(id: String, name: String, ects: f64) -> Self {
        Self {
            id,
            name,
            ects,
            midterm: String::new(),
            final_exam: String::new(),
            midterm_weight: String::new(),
            final_weight: String::new(),
            active: true,
        }
    }

    /// Builder-style helper that fills both score fields
    #[must_use]
    pub fn with_scores(mut self, midterm: Option<f64>, final_exam: Option<f64>) -> Self {
        self.midterm = midterm.map(|v| v.to_string()).unwrap_or_default();
        self.final_exam = final_exam.map(|v| v.to_string()).unwrap_or_default();
        self
    }

    /// Builder-style helper that sets an explicit weight pair
    #[must_use]
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.midterm_weight = weights.midterm.to_string();
        self.final_weight = weights.final_exam.to_string();
        self
    }

    /// Raw text of a score field
    #[must_use]
    pub fn field(&self, field: ScoreField) -> &str {
        match field {
            ScoreField::Midterm => &self.midterm,
            ScoreField::Final => &self.final_exam,
        }
    }

    /// Overwrite the raw text of a score field
    pub fn set_field(&mut self, field: ScoreField, text: String) {
        match field {
            ScoreField::Midterm => self.midterm = text,
            ScoreField::Final => self.final_exam = text,
        }
    }

    /// Parsed midterm score, if present
    #[must_use]
    pub fn midterm_score(&self) -> Option<f64> {
        parse_number(&self.midterm)
    }

    /// Parsed final-exam score, if present
    #[must_use]
    pub fn final_score(&self) -> Option<f64> {
        parse_number(&self.final_exam)
    }

    /// Explicit weight pair, only when both components parse as numbers
    #[must_use]
    pub fn explicit_weights(&self) -> Option<Weights> {
        let midterm = parse_number(&self.midterm_weight)?;
        let final_exam = parse_number(&self.final_weight)?;
        Some(Weights::new(midterm, final_exam))
    }

    /// Whether any score field holds non-blank text
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.midterm.trim().is_empty() || !self.final_exam.trim().is_empty()
    }

    /// Blank both score fields
    pub fn clear_scores(&mut self) {
        self.midterm.clear();
        self.final_exam.clear();
    }

    /// Whether the subject takes part in bloc aggregation (active with positive ECTS)
    #[must_use]
    pub fn is_counted(&self) -> bool {
        self.active && self.ects > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject::new("algo".to_string(), "Algorithms".to_string(), 5.0)
    }

    #[test]
    fn test_subject_creation() {
        let s = subject();
        assert_eq!(s.id, "algo");
        assert_eq!(s.name, "Algorithms");
        assert!((s.ects - 5.0).abs() < f64::EPSILON);
        assert!(s.active);
        assert!(s.midterm_score().is_none());
        assert!(s.final_score().is_none());
        assert!(!s.has_input());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_infinite_text_is_absent() {
        for text in ["inf", "-inf", "infinity", "Infinity", "1e400"] {
            assert_eq!(parse_number(text), None, "{text}");
        }
    }

    #[test]
    fn test_infinite_weight_falls_back_to_defaults() {
        let mut s = subject().with_scores(Some(12.0), Some(12.0));
        s.midterm_weight = "inf".to_string();
        s.final_weight = "0.6".to_string();
        assert!(s.explicit_weights().is_none());

        s.set_field(ScoreField::Midterm, "infinity".to_string());
        assert!(s.midterm_score().is_none());
    }

    #[test]
    fn test_scores_and_fields() {
        let mut s = subject().with_scores(Some(12.0), None);
        assert_eq!(s.midterm_score(), Some(12.0));
        assert!(s.final_score().is_none());
        assert!(s.has_input());

        s.set_field(ScoreField::Final, "15.5".to_string());
        assert_eq!(s.field(ScoreField::Final), "15.5");
        assert_eq!(s.final_score(), Some(15.5));

        s.clear_scores();
        assert!(!s.has_input());
    }

    #[test]
    fn test_unparsable_text_counts_as_input() {
        let mut s = subject();
        s.set_field(ScoreField::Midterm, "abc".to_string());
        assert!(s.has_input());
        assert!(s.midterm_score().is_none());
    }

    #[test]
    fn test_explicit_weights_require_both_components() {
        let mut s = subject();
        assert!(s.explicit_weights().is_none());

        s.midterm_weight = "0.5".to_string();
        assert!(s.explicit_weights().is_none());

        s.final_weight = "0.5".to_string();
        assert_eq!(s.explicit_weights(), Some(Weights::new(0.5, 0.5)));

        s.final_weight = "half".to_string();
        assert!(s.explicit_weights().is_none());
    }

    #[test]
    fn test_is_counted() {
        let mut s = subject();
        assert!(s.is_counted());
        s.active = false;
        assert!(!s.is_counted());

        let zero = Subject::new("pe".to_string(), "Sport".to_string(), 0.0);
        assert!(!zero.is_counted());
    }

    #[test]
    fn test_score_field_parsing() {
        assert_eq!("midterm".parse::<ScoreField>(), Ok(ScoreField::Midterm));
        assert_eq!("FINAL".parse::<ScoreField>(), Ok(ScoreField::Final));
        assert!("oral".parse::<ScoreField>().is_err());
        assert_eq!(ScoreField::Final.to_string(), "final");
    }

    #[test]
    fn test_default_weights() {
        let w = Weights::default();
        assert!((w.midterm - 0.4).abs() < f64::EPSILON);
        assert!((w.final_exam - 0.6).abs() < f64::EPSILON);
    }
}
