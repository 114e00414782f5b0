//! Unified error types for chatpurge.
//!
//! This module provides a single [`PurgeError`] enum that covers every failure
//! the library can report. Callers decide how severe a failure is: the
//! extraction pipeline turns per-file errors into logged skips, while an
//! unreadable export directory is surfaced to the binary as fatal.
//!
//! # Severity at a glance
//!
//! | Variant | Where it stops |
//! |---------|----------------|
//! | [`Metadata`](PurgeError::Metadata), [`Csv`](PurgeError::Csv), [`Json`](PurgeError::Json) | one file is skipped |
//! | [`InvalidId`](PurgeError::InvalidId) | one row or record is skipped |
//! | [`Transport`](PurgeError::Transport), [`Http`](PurgeError::Http) | one delete is abandoned |
//! | [`DirectoryRead`](PurgeError::DirectoryRead), [`MissingToken`](PurgeError::MissingToken) | the run aborts |

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatpurge operations.
pub type Result<T> = std::result::Result<T, PurgeError>;

/// The error type for all chatpurge operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PurgeError {
    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export directory itself could not be listed.
    ///
    /// This is the only extraction failure that aborts a run.
    #[error("Cannot read export directory {}: {source}", path.display())]
    DirectoryRead {
        /// The directory that was being listed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The channel metadata sidecar is missing or could not be decoded.
    #[error("Unusable channel metadata {}: {reason}", path.display())]
    Metadata {
        /// Path of the sidecar that was looked up
        path: PathBuf,
        /// Why the sidecar was rejected
        reason: String,
    },

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A field that must hold a decimal snowflake did not.
    #[error("Invalid id '{input}': expected a decimal integer")]
    InvalidId {
        /// The value that failed to parse
        input: String,
    },

    /// Neither a bot token nor a user token was supplied.
    #[error("No credentials: supply a bot token or a user token")]
    MissingToken,

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The HTTP client reported an error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A delete request never produced a response.
    #[error("Transport error for {url}: {message}")]
    Transport {
        /// Target URL of the failed request
        url: String,
        /// Description of the failure
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl PurgeError {
    /// Creates a directory-listing error.
    pub fn directory_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PurgeError::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a metadata sidecar error.
    pub fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PurgeError::Metadata {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid id error.
    pub fn invalid_id(input: impl Into<String>) -> Self {
        PurgeError::InvalidId {
            input: input.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        PurgeError::Config(message.into())
    }

    /// Creates a transport error.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        PurgeError::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this error should abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PurgeError::DirectoryRead { .. } | PurgeError::MissingToken | PurgeError::Config(_)
        )
    }

    /// Returns `true` if this is a network-level failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, PurgeError::Transport { .. } | PurgeError::Http(_))
    }

    /// Returns `true` if this is a metadata sidecar error.
    pub fn is_metadata(&self) -> bool {
        matches!(self, PurgeError::Metadata { .. })
    }
}

/// Parses a decimal snowflake id.
///
/// Surrounding whitespace is tolerated; anything else is an [`PurgeError::InvalidId`].
pub fn parse_id(input: &str) -> Result<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| PurgeError::invalid_id(input))
}
