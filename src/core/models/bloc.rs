//! Bloc (module) model

use super::Subject;
use serde::{Deserialize, Serialize};

/// A group of subjects whose credit-weighted average must meet a target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bloc {
    /// Unique identifier (e.g., "bloc-4")
    pub id: String,

    /// Display name (e.g., "Languages")
    pub name: String,

    /// Subjects of the bloc, in display order
    #[serde(default)]
    pub subjects: Vec<Subject>,

    /// Pairs of mutually exclusive electives, by subject id
    #[serde(default)]
    pub exclusive: Vec<(String, String)>,
}

impl Bloc {
    /// Create a new empty bloc
    ///
    /// # Arguments
    /// * `id` - Unique bloc id
    /// * `name` - Display name
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            subjects: Vec::new(),
            exclusive: Vec::new(),
        }
    }

    /// Add a subject to the bloc
    pub fn add_subject(&mut self, subject: Subject) {
        self.subjects.push(subject);
    }

    /// Declare two subjects of this bloc as mutually exclusive electives
    pub fn add_exclusive_pair(&mut self, first: String, second: String) {
        self.exclusive.push((first, second));
    }

    /// Get a subject by id
    #[must_use]
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Get a mutable subject by id
    pub fn subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == id)
    }

    /// Subjects that take part in aggregation (active with positive ECTS)
    pub fn counted_subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter().filter(|s| s.is_counted())
    }

    /// ECTS of every counted subject, regardless of completion
    #[must_use]
    pub fn counted_ects(&self) -> f64 {
        self.counted_subjects().map(|s| s.ects).sum()
    }
}
