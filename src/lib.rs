//! Blade scaffolds projects from a bundled template archive and checks
//! sources for APIs that moved during a platform upgrade.

/// Template archive access
pub mod archive;

/// Command-line interface module for the blade application
pub mod cli;

/// Command name to handler registry
pub mod commands;

/// Settings file handling
/// Supports JSON and YAML formats (blade.json, blade.yml, blade.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the blade application
pub mod error;

/// Project generation orchestration
/// Filters archive entries, substitutes tokens and writes the project
pub mod generator;

pub mod logger;

/// Deprecated API detection
pub mod migration;

/// Literal token substitution
pub mod substitution;

/// Template kinds and build flavors
pub mod template;
