//! Error types for anchorprobe.
//!
//! Library crates use [`AnchorProbeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` and maps each kind to a user-facing hint.

use std::path::PathBuf;
use std::time::Duration;

/// Top-level error type for all anchorprobe operations.
///
/// The fetch variants (`Timeout`, `ConnectionFailure`, `HttpStatus`, `Request`)
/// and `Parse` terminate an extraction; "nothing found" outcomes are not errors
/// and are reported through [`crate::Notice`] instead.
#[derive(Debug, thiserror::Error)]
pub enum AnchorProbeError {
    /// No response arrived within the fetch time bound.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The transport could not reach the host.
    #[error("could not connect to {url}: {detail}")]
    ConnectionFailure { url: String, detail: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason} from {url}")]
    HttpStatus {
        url: String,
        status: u16,
        reason: String,
    },

    /// Any other transport or protocol failure.
    #[error("request to {url} failed: {detail}")]
    Request { url: String, detail: String },

    /// The fetched text cannot be treated as markup at all.
    #[error("parse error: {detail}")]
    Parse { detail: String },

    /// Caller input rejected before any network activity.
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AnchorProbeError>;

impl AnchorProbeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse { detail: msg.into() }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable machine-readable tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::ConnectionFailure { .. } => "connection_failure",
            Self::HttpStatus { .. } => "http_status",
            Self::Request { .. } => "request",
            Self::Parse { .. } => "parse",
            Self::Validation { .. } => "validation",
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
        }
    }
}
