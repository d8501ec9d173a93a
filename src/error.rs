//! Typed error hierarchy shared by the persistence and publish layers. The
//! UI reduces these to a footer message with `surface_error`; the variants
//! exist so callers can tell a rejected input apart from a broken file or a
//! failed external command.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required field was blank after trimming. No state was changed.
    #[error("{field} is required.")]
    Validation {
        /// Human-readable field label, e.g. `"Store name"`.
        field: &'static str,
    },

    /// The targeted record is no longer present in the store. Happens only
    /// when a selection outlives the entry it pointed at; the store refuses
    /// to guess and leaves everything untouched.
    #[error("The selected record no longer exists.")]
    StaleSelection,

    /// Reading or writing the document file failed.
    #[error("I/O error during {operation} on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    /// The document file exists but does not hold a valid JSON record array.
    #[error("'{}' is not a valid record document: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced by the publish sequence. Each git step surfaces its raw
/// stderr text; there is no rollback, so the message is all the operator has
/// to recover with.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The commit-counter file could not be read or written.
    #[error("Commit counter unavailable: {0}")]
    Counter(#[source] io::Error),

    /// The counter file exists but does not contain a base-10 integer.
    #[error("Commit counter file is corrupt: {0}")]
    CounterFormat(#[source] std::num::ParseIntError),

    /// The git binary itself could not be started.
    #[error("Failed to run git {step}: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    /// A git step exited nonzero. `stderr` carries git's own explanation.
    #[error("git {step} failed: {stderr}")]
    Command { step: &'static str, stderr: String },
}
