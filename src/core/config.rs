//! Configuration module for `MogTracker`

use crate::core::engine::GradingTargets;
use crate::core::models::Weights;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$MOG_TRACKER";

/// Keys accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 9] = [
    "level",
    "file",
    "verbose",
    "passing_grade",
    "target_mog",
    "midterm_weight",
    "final_weight",
    "semester_file",
    "reports_dir",
];

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Grading targets and default weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Average a subject needs to pass
    #[serde(default = "default_passing_grade")]
    pub passing_grade: f64,
    /// MOG a bloc needs to be validated
    #[serde(default = "default_target_mog")]
    pub target_mog: f64,
    /// Midterm weight for subjects without explicit weights
    #[serde(default = "default_midterm_weight")]
    pub midterm_weight: f64,
    /// Final weight for subjects without explicit weights
    #[serde(default = "default_final_weight")]
    pub final_weight: f64,
}

const fn default_passing_grade() -> f64 {
    10.0
}

const fn default_target_mog() -> f64 {
    10.0
}

const fn default_midterm_weight() -> f64 {
    0.4
}

const fn default_final_weight() -> f64 {
    0.6
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            passing_grade: default_passing_grade(),
            target_mog: default_target_mog(),
            midterm_weight: default_midterm_weight(),
            final_weight: default_final_weight(),
        }
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Semester file used when no file is given on the command line
    #[serde(default)]
    pub semester_file: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Grading settings
    #[serde(default)]
    pub grading: GradingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override passing grade
    pub passing_grade: Option<f64>,
    /// Override target MOG
    pub target_mog: Option<f64>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
}

fn parse_number_value(key: &str, value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("Invalid number for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$MOG_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/mogtracker`
    /// - macOS: `~/Library/Application Support/mogtracker`
    /// - Windows: `%APPDATA%\mogtracker`
    #[must_use]
    pub fn get_mogtracker_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mogtracker")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// filled; numeric grading fields already fall back to their serde
    /// defaults when absent from the file.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.semester_file.is_empty() && !defaults.paths.semester_file.is_empty() {
            self.paths
                .semester_file
                .clone_from(&defaults.paths.semester_file);
            changed = true;
        }
        if self.paths.reports_dir.is_empty() && !defaults.paths.reports_dir.is_empty() {
            self.paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect this run; the configuration file is untouched.
    /// Only non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// let overrides = ConfigOverrides {
    ///     target_mog: Some(12.0),
    ///     ..Default::default()
    /// };
    /// config.apply_overrides(&overrides);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(passing_grade) = overrides.passing_grade {
            self.grading.passing_grade = passing_grade;
        }
        if let Some(target_mog) = overrides.target_mog {
            self.grading.target_mog = target_mog;
        }

        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
    }

    /// Targets handed to the calculation engine
    #[must_use]
    pub const fn targets(&self) -> GradingTargets {
        GradingTargets::new(self.grading.passing_grade, self.grading.target_mog)
    }

    /// Weights for subjects without an explicit pair
    #[must_use]
    pub const fn default_weights(&self) -> Weights {
        Weights::new(self.grading.midterm_weight, self.grading.final_weight)
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_mogtracker_dir`].
    ///
    /// [`get_mogtracker_dir`]: Self::get_mogtracker_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_mogtracker_dir().join(CONFIG_FILE_NAME)
    }

    /// Replace `$MOG_TRACKER` with the config directory path
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_mogtracker_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields use their serde defaults; `$MOG_TRACKER` is expanded in
    /// path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.semester_file = Self::expand_variables(&config.paths.semester_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults if not found
    ///
    /// - File exists: load it, merge missing fields from defaults, save if anything was added
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults on any error.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `passing_grade`,
    /// `target_mog`, `midterm_weight`, `final_weight`, `semester_file`,
    /// `reports_dir` (dashes accepted in place of underscores).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "passing_grade" | "passing-grade" => Some(self.grading.passing_grade.to_string()),
            "target_mog" | "target-mog" => Some(self.grading.target_mog.to_string()),
            "midterm_weight" | "midterm-weight" => Some(self.grading.midterm_weight.to_string()),
            "final_weight" | "final-weight" => Some(self.grading.final_weight.to_string()),
            "semester_file" | "semester-file" => Some(self.paths.semester_file.clone()),
            "reports_dir" | "reports-dir" => Some(self.paths.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// (boolean for `verbose`, finite number for grading keys).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "passing_grade" | "passing-grade" => {
                self.grading.passing_grade = parse_number_value(key, value)?;
            }
            "target_mog" | "target-mog" => {
                self.grading.target_mog = parse_number_value(key, value)?;
            }
            "midterm_weight" | "midterm-weight" => {
                self.grading.midterm_weight = parse_number_value(key, value)?;
            }
            "final_weight" | "final-weight" => {
                self.grading.final_weight = parse_number_value(key, value)?;
            }
            "semester_file" | "semester-file" => self.paths.semester_file = value.to_string(),
            "reports_dir" | "reports-dir" => self.paths.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset a single configuration value to its default
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "passing_grade" | "passing-grade" => {
                self.grading.passing_grade = defaults.grading.passing_grade;
            }
            "target_mog" | "target-mog" => self.grading.target_mog = defaults.grading.target_mog,
            "midterm_weight" | "midterm-weight" => {
                self.grading.midterm_weight = defaults.grading.midterm_weight;
            }
            "final_weight" | "final-weight" => {
                self.grading.final_weight = defaults.grading.final_weight;
            }
            "semester_file" | "semester-file" => self
                .paths
                .semester_file
                .clone_from(&defaults.paths.semester_file),
            "reports_dir" | "reports-dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file so the next [`load()`](Config::load) recreates it
    ///
    /// Succeeds without doing anything if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[grading]")?;
        writeln!(f, "  passing_grade = {}", self.grading.passing_grade)?;
        writeln!(f, "  target_mog = {}", self.grading.target_mog)?;
        writeln!(f, "  midterm_weight = {}", self.grading.midterm_weight)?;
        writeln!(f, "  final_weight = {}", self.grading.final_weight)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  semester_file = \"{}\"", self.paths.semester_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        Ok(())
    }
}
