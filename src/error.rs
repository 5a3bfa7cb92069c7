//! Error types for mep-splice-engine.
//!
//! Expected, frequent outcomes are not represented here: finding nothing
//! to splice is an empty result, and a degenerate splice pair is silently
//! skipped. Only genuine failures become errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::host::HostError;

/// Errors that can occur while running a duplication command.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host document rejected an operation.
    #[error(transparent)]
    Host(#[from] HostError),

    /// The user cancelled the operation between offset steps.
    ///
    /// The enclosing transaction is rolled back in full; no step is left
    /// committed.
    #[error("operation cancelled after {completed} of {total} steps")]
    Cancelled {
        /// Number of offset steps completed before cancellation.
        completed: usize,
        /// Total number of offset steps requested.
        total: usize,
    },

    /// The command was invoked with an empty element batch.
    #[error("selection contains no elements to copy")]
    EmptySelection,

    /// A per-level copy was invoked with no target levels.
    #[error("no target levels selected")]
    NoLevels,
}

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be written.
    #[error("failed to write configuration file: {path}")]
    WriteError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}
