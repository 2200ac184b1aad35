//! Line length checking.
//!
//! Each tab counts as a fixed number of columns (literal substitution, not
//! tab-stop alignment) and length is measured in Unicode scalar values, so a
//! line of 121 `é` is 121 characters long, not 242.
//!
//! A physical line longer than [`MAX_LINE_BYTES`] cannot be buffered. When
//! the configured limit is below that cap the line is reported as an issue
//! and the rest of the file is skipped. When the limit is at or above the cap
//! the condition is a scan error.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{CheckError, CheckResult, ConfigError, ConfigResult};
use crate::issue::Issue;

/// Source identifier attached to every issue from this check.
pub const CHECK_NAME: &str = "lll";

/// Default maximum line length.
pub const DEFAULT_LINE_LENGTH: usize = 120;

/// Default width of a tab character.
pub const DEFAULT_TAB_WIDTH: usize = 1;

/// Largest physical line, in bytes, the scanner can hold.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Parameters for one check invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Lines longer than this many characters are reported.
    pub max_line_length: usize,
    /// Number of characters each tab counts as. Zero makes tabs invisible.
    pub tab_width: usize,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_LINE_LENGTH,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl CheckConfig {
    /// Build a config, rejecting a zero line length.
    pub fn new(max_line_length: usize, tab_width: usize) -> ConfigResult<Self> {
        if max_line_length == 0 {
            return Err(ConfigError::Invalid {
                field: "line_length",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            max_line_length,
            tab_width,
        })
    }
}

/// A check a host harness can run against one file at a time.
pub trait Check {
    /// Identifier reported as the issue source.
    fn name(&self) -> &'static str;

    /// Inspect a single file.
    fn check_file(&self, path: &Utf8Path) -> CheckResult<Vec<Issue>>;
}

/// Flags lines whose displayed length exceeds a limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineLengthChecker {
    config: CheckConfig,
}

impl LineLengthChecker {
    /// Create a checker with the given limits.
    pub const fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    /// The limits this checker applies.
    pub const fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Scan already-open content, attributing issues to `path`.
    ///
    /// Read failures surface as [`CheckError::Scan`].
    pub fn check_reader<R: Read>(&self, path: &Utf8Path, reader: R) -> CheckResult<Vec<Issue>> {
        let mut reader = BufReader::new(reader);
        let mut issues = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 1;
        let cap = MAX_LINE_BYTES as u64 + 1;

        loop {
            buf.clear();
            let read = reader
                .by_ref()
                .take(cap)
                .read_until(b'\n', &mut buf)
                .map_err(|source| CheckError::Scan {
                    path: path.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }

            if buf.last() == Some(&b'\n') {
                buf.pop();
            } else if buf.len() > MAX_LINE_BYTES {
                if self.config.max_line_length < MAX_LINE_BYTES {
                    tracing::debug!(%path, line = line_number, "line exceeds scan buffer");
                    issues.push(Issue::new(
                        path,
                        line_number,
                        1,
                        format!("line is more than {MAX_LINE_BYTES} characters"),
                        CHECK_NAME,
                    ));
                    break;
                }
                return Err(CheckError::Scan {
                    path: path.to_path_buf(),
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("line {line_number} is longer than {MAX_LINE_BYTES} bytes"),
                    ),
                });
            }
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }

            let length = byte_line_length(&buf, self.config.tab_width);
            if length > self.config.max_line_length {
                issues.push(Issue::new(
                    path,
                    line_number,
                    0,
                    format!("line is {length} characters"),
                    CHECK_NAME,
                ));
            }
            line_number += 1;
        }

        Ok(issues)
    }
}

impl Check for LineLengthChecker {
    fn name(&self) -> &'static str {
        CHECK_NAME
    }

    #[tracing::instrument(
        skip(self),
        fields(limit = self.config.max_line_length, tab_width = self.config.tab_width)
    )]
    fn check_file(&self, path: &Utf8Path) -> CheckResult<Vec<Issue>> {
        let file = File::open(path.as_std_path()).map_err(|source| CheckError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let issues = self.check_reader(path, file)?;
        tracing::debug!(%path, issues = issues.len(), "file checked");
        Ok(issues)
    }
}

/// Check every path with one config and concatenate the issues.
///
/// The first file that cannot be opened or read aborts the run; no partial
/// list is returned.
pub fn check(config: &CheckConfig, paths: &[Utf8PathBuf]) -> CheckResult<Vec<Issue>> {
    let checker = LineLengthChecker::new(*config);
    let mut issues = Vec::new();
    for path in paths {
        issues.extend(checker.check_file(path)?);
    }
    Ok(issues)
}

/// Displayed length of raw line bytes. Each byte of an invalid UTF-8
/// sequence counts as one character.
pub fn byte_line_length(bytes: &[u8], tab_width: usize) -> usize {
    bytes
        .utf8_chunks()
        .map(|chunk| visible_length(chunk.valid(), tab_width) + chunk.invalid().len())
        .sum()
}

/// Displayed length of a line: characters, with each tab counting `tab_width`.
pub fn visible_length(line: &str, tab_width: usize) -> usize {
    line.chars()
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn checker(limit: usize, tab_width: usize) -> LineLengthChecker {
        LineLengthChecker::new(CheckConfig::new(limit, tab_width).unwrap())
    }

    #[test]
    fn short_lines_produce_no_issues() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "ok.txt", "fn main() {}\n\nlet x = 1;\n");
        let issues = checker(120, 1).check_file(&path).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn reports_long_line_with_its_length() {
        let tmp = TempDir::new().unwrap();
        let content = format!("short\n{}\n", "x".repeat(150));
        let path = write_fixture(&tmp, "long.txt", &content);

        let issues = checker(120, 1).check_file(&path).unwrap();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].column, 0);
        assert_eq!(issues[0].message, "line is 150 characters");
        assert_eq!(issues[0].source, CHECK_NAME);
        assert_eq!(issues[0].file, path);
    }

    #[test]
    fn line_at_limit_is_not_reported() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "edge.txt", &"y".repeat(120));
        assert!(checker(120, 1).check_file(&path).unwrap().is_empty());
    }

    #[test]
    fn one_issue_per_long_line_in_order() {
        let tmp = TempDir::new().unwrap();
        let long = "z".repeat(11);
        let content = format!("{long}\nok\n{long}\n{long}");
        let path = write_fixture(&tmp, "many.txt", &content);

        let issues = checker(10, 1).check_file(&path).unwrap();

        let lines: Vec<usize> = issues.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![1, 3, 4]);
    }

    #[test]
    fn tab_counts_as_tab_width_regardless_of_column() {
        let report = checker(3, 4).check_reader(Utf8Path::new("t"), Cursor::new("\t\n")).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].message, "line is 4 characters");

        let report = checker(5, 4).check_reader(Utf8Path::new("t"), Cursor::new("ab\t\n")).unwrap();
        assert_eq!(report[0].message, "line is 6 characters");
    }

    #[test]
    fn zero_tab_width_makes_tabs_invisible() {
        let issues = checker(2, 0)
            .check_reader(Utf8Path::new("t"), Cursor::new("\t\t\tab\n"))
            .unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn counts_code_points_not_bytes() {
        let line = "é".repeat(121);
        assert_eq!(line.len(), 242);
        let issues = checker(120, 1)
            .check_reader(Utf8Path::new("u.txt"), Cursor::new(line))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "line is 121 characters");
    }

    #[test]
    fn crlf_terminator_is_not_counted() {
        let content = format!("{}\r\n", "a".repeat(10));
        let issues = checker(10, 1)
            .check_reader(Utf8Path::new("crlf"), Cursor::new(content))
            .unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn invalid_utf8_counts_each_bad_byte() {
        let bytes: Vec<u8> = vec![b'a', 0xff, b'b'];
        let issues = checker(2, 1)
            .check_reader(Utf8Path::new("bin"), Cursor::new(bytes))
            .unwrap();
        assert_eq!(issues[0].message, "line is 3 characters");
    }

    #[test]
    fn truncated_utf8_sequence_counts_per_byte() {
        let mut bytes = vec![b'a'; 118];
        bytes.extend_from_slice(&[0xF0, 0x9F, 0x98]);
        let issues = checker(120, 1)
            .check_reader(Utf8Path::new("bin"), Cursor::new(bytes))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "line is 121 characters");
        assert_eq!(byte_line_length(&[0xF0, 0x9F, 0x98, b'\t'], 4), 7);
    }

    #[test]
    fn oversized_line_becomes_issue_below_cap() {
        let tmp = TempDir::new().unwrap();
        let content = format!("ok\n{}\n{}\n", "x".repeat(2_000_000), "y".repeat(200));
        let path = write_fixture(&tmp, "generated.go", &content);

        let issues = checker(120, 1).check_file(&path).unwrap();

        // Scanning stops at the oversized line, so line 3 is never seen.
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].column, 1);
        assert_eq!(issues[0].message, format!("line is more than {MAX_LINE_BYTES} characters"));
    }

    #[test]
    fn oversized_line_is_scan_error_at_or_above_cap() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "generated.go", &"x".repeat(2_000_000));

        let err = checker(MAX_LINE_BYTES, 1).check_file(&path).unwrap_err();

        assert!(matches!(err, CheckError::Scan { .. }));
        assert_eq!(err.path(), &path);
    }

    #[test]
    fn line_exactly_at_cap_is_scanned() {
        let content = format!("{}\nshort\n", "x".repeat(MAX_LINE_BYTES));
        let issues = checker(120, 1)
            .check_reader(Utf8Path::new("cap"), Cursor::new(content))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, format!("line is {MAX_LINE_BYTES} characters"));
    }

    #[test]
    fn missing_file_is_open_error() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("nope.go")).unwrap();
        let err = checker(120, 1).check_file(&path).unwrap_err();
        assert!(matches!(err, CheckError::Open { .. }));
        assert!(err.to_string().contains("nope.go"));
    }

    #[test]
    fn empty_file_has_no_issues() {
        let tmp = TempDir::new().unwrap();
        let path = write_fixture(&tmp, "empty.txt", "");
        assert!(checker(120, 1).check_file(&path).unwrap().is_empty());
    }

    #[test]
    fn read_failure_is_scan_error() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk on fire"))
            }
        }
        let err = checker(120, 1)
            .check_reader(Utf8Path::new("broken"), Broken)
            .unwrap_err();
        assert!(matches!(err, CheckError::Scan { .. }));
    }

    #[test]
    fn batch_check_concatenates_in_path_order() {
        let tmp = TempDir::new().unwrap();
        let a = write_fixture(&tmp, "a.txt", &"a".repeat(5));
        let b = write_fixture(&tmp, "b.txt", "ok\nok\n");
        let c = write_fixture(&tmp, "c.txt", &format!("ok\n{}", "c".repeat(6)));
        let config = CheckConfig::new(4, 1).unwrap();

        let issues = check(&config, &[a.clone(), b, c.clone()]).unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].file, a);
        assert_eq!(issues[1].file, c);
        assert_eq!(issues[1].line, 2);
    }

    #[test]
    fn batch_check_aborts_on_first_error() {
        let tmp = TempDir::new().unwrap();
        let a = write_fixture(&tmp, "a.txt", &"a".repeat(50));
        let missing = Utf8PathBuf::try_from(tmp.path().join("missing.txt")).unwrap();
        let result = check(&CheckConfig::new(10, 1).unwrap(), &[a, missing]);
        assert!(matches!(result, Err(CheckError::Open { .. })));
    }

    #[test]
    fn zero_line_length_is_rejected() {
        assert!(matches!(
            CheckConfig::new(0, 1),
            Err(ConfigError::Invalid { field: "line_length", .. })
        ));
    }

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.max_line_length, 120);
        assert_eq!(config.tab_width, 1);
        assert_eq!(LineLengthChecker::default().name(), "lll");
    }
}
