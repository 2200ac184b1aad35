//! Issue records produced by checks.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// One reported violation, tied to a file and line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Path of the offending file, as given by the caller.
    pub file: Utf8PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, or 0 when the issue applies to the whole line.
    pub column: usize,
    /// Human-readable description.
    pub message: String,
    /// Name of the check that produced the issue.
    pub source: String,
}

impl Issue {
    /// Create an issue for `file` at `line`/`column`.
    pub fn new(
        file: &Utf8Path,
        line: usize,
        column: usize,
        message: impl Into<String>,
        source: &str,
    ) -> Self {
        Self {
            file: file.to_path_buf(),
            line,
            column,
            message: message.into(),
            source: source.to_string(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.column > 0 {
            write!(f, "{}:{}:{}: ", self.file, self.line, self.column)?;
        } else {
            write!(f, "{}:{}: ", self.file, self.line)?;
        }
        write!(f, "{} ({})", self.message, self.source)
    }
}
