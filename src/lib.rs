//! Shared library for `MogTracker`
//! Contains the grade calculation engine and the configuration and logging used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
