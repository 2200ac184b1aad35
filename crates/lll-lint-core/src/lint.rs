//! Lint execution engine.
//!
//! Runs the line length check over a list of files, applying path-based
//! overrides from [`RuleSet`] on top of the project-wide [`CheckConfig`].

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::CheckResult;
use crate::issue::Issue;
use crate::lll::{Check, CheckConfig, LineLengthChecker};
use crate::rules::RuleSet;

/// What to do when a file cannot be opened or read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failing file and return its error.
    #[default]
    Abort,
    /// Record the failure in the report and continue with the next file.
    Continue,
}

/// A file that could not be checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileFailure {
    /// The file that failed.
    pub file: Utf8PathBuf,
    /// Rendered error message.
    pub error: String,
}

/// Combined results for one lint run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintReport {
    /// Number of files scanned.
    pub files_checked: usize,
    /// Number of files excluded by a `skip` rule.
    pub files_skipped: usize,
    /// Issues in path order, then line order.
    pub issues: Vec<Issue>,
    /// Files that could not be checked (only with [`OnError::Continue`]).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FileFailure>,
    /// `true` only if there are no issues and no failures.
    pub pass: bool,
}

/// Run the check over `paths`.
///
/// `on_file` is called after each path is handled, whether it was checked,
/// skipped, or failed; callers use it to drive progress output.
#[tracing::instrument(skip_all, fields(files = paths.len()))]
pub fn run_lint(
    paths: &[Utf8PathBuf],
    base: CheckConfig,
    rules: &RuleSet,
    on_error: OnError,
    mut on_file: impl FnMut(&Utf8PathBuf),
) -> CheckResult<LintReport> {
    let mut report = LintReport::default();

    for path in paths {
        let overrides = rules.resolve(path.as_str());
        let Some(config) = overrides.apply(base) else {
            tracing::debug!(%path, "skipped by rule");
            report.files_skipped += 1;
            on_file(path);
            continue;
        };

        match LineLengthChecker::new(config).check_file(path) {
            Ok(issues) => {
                report.files_checked += 1;
                report.issues.extend(issues);
            }
            Err(err) if on_error == OnError::Continue => {
                tracing::warn!(%path, error = %err, "file could not be checked");
                report.failures.push(FileFailure {
                    file: path.clone(),
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        on_file(path);
    }

    report.pass = report.issues.is_empty() && report.failures.is_empty();
    tracing::debug!(
        checked = report.files_checked,
        skipped = report.files_skipped,
        issues = report.issues.len(),
        failures = report.failures.len(),
        "lint finished"
    );
    Ok(report)
}
