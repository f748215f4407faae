//! Semester model

use super::{Bloc, Subject};
use serde::{Deserialize, Serialize};

/// A semester: the ordered blocs whose MOGs make up the overall GPA
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester name (e.g., "Semester 5")
    pub name: String,

    /// Blocs of the semester, in display order
    #[serde(default)]
    pub blocs: Vec<Bloc>,
}

impl Semester {
    /// Create a new empty semester
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            blocs: Vec::new(),
        }
    }

    /// Add a bloc to the semester
    pub fn add_bloc(&mut self, bloc: Bloc) {
        self.blocs.push(bloc);
    }

    /// Get a bloc by id
    #[must_use]
    pub fn bloc(&self, id: &str) -> Option<&Bloc> {
        self.blocs.iter().find(|b| b.id == id)
    }

    /// Get a mutable bloc by id
    pub fn bloc_mut(&mut self, id: &str) -> Option<&mut Bloc> {
        self.blocs.iter_mut().find(|b| b.id == id)
    }

    /// Find the bloc that owns a subject
    ///
    /// # Returns
    /// The bloc id, or `None` if no bloc contains the subject
    #[must_use]
    pub fn bloc_of(&self, subject_id: &str) -> Option<&str> {
        self.blocs
            .iter()
            .find(|b| b.subject(subject_id).is_some())
            .map(|b| b.id.as_str())
    }

    /// Get a subject by id, searching every bloc
    #[must_use]
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.blocs.iter().find_map(|b| b.subject(id))
    }

    /// Get a mutable subject by id, searching every bloc
    pub fn subject_mut(&mut self, id: &str) -> Option<&mut Subject> {
        self.blocs.iter_mut().find_map(|b| b.subject_mut(id))
    }

    /// Iterate over every subject of the semester
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> {
        self.blocs.iter().flat_map(|b| b.subjects.iter())
    }
}
