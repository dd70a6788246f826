//! Error handling for blade.
//! Defines the hard-failure error type and the result alias used throughout the crate.
//! Caller-correctable input problems are not errors; they are reported as
//! rejection messages by the generator and the command registry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Hard failures that abort the current command.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// File system error tied to a specific path
    #[error("Could not {action} '{}': {source}.", path.display())]
    PathError {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The template archive exists but could not be read
    #[error("Template archive error in '{}': {reason}.", archive.display())]
    ArchiveError { archive: PathBuf, reason: String },

    /// An archive entry resolved to a path outside of the target directory
    #[error("Template entry '{entry}' resolves to unsafe path '{target}'.")]
    UnsafeEntryPath { entry: String, target: String },

    /// Represents errors that occur during settings parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// A report could not be serialized
    #[error("Serialization error: {0}.")]
    SerializationError(#[from] serde_json::Error),

    /// The command registry has no handler for the requested name
    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),
}

impl Error {
    /// Wraps an I/O error with the action and path it failed on.
    pub fn at_path(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::PathError { action, path: path.into(), source }
    }
}

/// Convenience type alias for Results with blade's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
