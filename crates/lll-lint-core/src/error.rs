//! Error types for lll-lint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A configuration value is out of range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// The offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort checking a single file.
///
/// An over-long line is normally reported as an issue, not as an error.
/// See [`crate::lll::LineLengthChecker`] for the one case where it is not.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The file could not be opened.
    #[error("can't open file {path}: {source}")]
    Open {
        /// Path as given by the caller.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Reading the file failed part way through.
    #[error("can't scan file {path}: {source}")]
    Scan {
        /// Path as given by the caller.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl CheckError {
    /// The path of the file that failed.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::Open { path, .. } | Self::Scan { path, .. } => path,
        }
    }
}

/// Result type alias using [`CheckError`].
pub type CheckResult<T> = Result<T, CheckError>;
