//! Core module for the grade calculation engine and its collaborators

pub mod config;
pub mod display;
pub mod electives;
pub mod engine;
pub mod models;
pub mod report;
pub mod semester_file;
pub mod tracker;

/// Returns the current version of the `MogTracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
