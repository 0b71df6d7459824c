//! Source and sink error types.
//!
//! Either one aborts the audit run; there is no partial report.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the record set.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Snapshot file could not be read.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not a valid record set.
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Request to the tracker failed before a response arrived.
    #[error("tracker request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Tracker base URL does not parse.
    #[error("invalid tracker URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Tracker answered with an error status.
    #[error("tracker returned HTTP {status}: {message}")]
    TrackerApi { status: u16, message: String },

    /// Tracker credentials are not configured.
    #[error("tracker password not set (expected in ${env_var})")]
    MissingCredentials { env_var: String },
}

/// Failure to persist the report or snapshot.
#[derive(Debug, Error)]
pub enum SinkError {
    /// File I/O error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("failed to serialize JSON: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Temp file could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
