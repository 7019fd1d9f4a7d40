//! Error types for DDL generation.

use std::path::PathBuf;

use ddlforge_core::{Dialect, UnknownDialectError};

/// Errors that can occur while generating and synchronizing DDL scripts.
#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    /// The request failed basic validation before any work started.
    #[error("invalid generation request: {0}")]
    Configuration(String),

    /// A requested dialect identifier is not in the closed registry.
    #[error(transparent)]
    UnknownDialect(#[from] UnknownDialectError),

    /// The mapped-type source could not be constructed or queried.
    #[error("failed to load mapped types: {0}")]
    ScanConfiguration(String),

    /// The backend could not render a mapped type for a dialect.
    #[error("failed to render type '{type_name}' for dialect '{dialect}': {message}")]
    Generation {
        /// Fully-qualified name of the offending type.
        type_name: String,
        /// The dialect being generated.
        dialect: Dialect,
        /// What went wrong.
        message: String,
    },

    /// The output path is occupied by a non-directory entry.
    #[error("output path '{}' exists but is not a directory", .0.display())]
    DestinationConflict(PathBuf),

    /// Scratch-file or destination IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for DDL generation operations.
pub type Result<T> = std::result::Result<T, DdlError>;
