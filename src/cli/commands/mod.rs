//! CLI command handlers for `MogTracker`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod calc;
pub mod config;
pub mod report;

use mog_tracker::config::Config;
use mog_tracker::core::models::Semester;
use mog_tracker::core::semester_file::load_semester;
use mog_tracker::{error, info};
use std::path::{Path, PathBuf};

/// Resolve the semester file: the given path, or config `semester_file`
pub fn semester_path(input_file: Option<&Path>, config: &Config) -> Result<PathBuf, String> {
    match input_file {
        Some(path) => Ok(path.to_path_buf()),
        None if !config.paths.semester_file.is_empty() => {
            Ok(PathBuf::from(&config.paths.semester_file))
        }
        None => Err("✗ No semester file given and config `semester_file` is empty".to_string()),
    }
}

/// Load a semester file, logging failures
pub fn load(path: &Path) -> Result<Semester, String> {
    let semester = load_semester(path).map_err(|e| {
        error!("Failed to load semester {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;
    info!("Semester loaded: {}", path.display());
    Ok(semester)
}
