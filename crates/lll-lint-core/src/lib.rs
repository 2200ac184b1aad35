//! Core library for lll-lint.
//!
//! This crate provides the long-line check and the configuration plumbing
//! used by the `lll-lint` CLI and any downstream harness.
//!
//! # Modules
//!
//! - [`lll`] - The line length check itself
//! - [`lint`] - Multi-file runs with path-based overrides
//! - [`rules`] - Glob rule resolution
//! - [`config`] - Configuration loading and management
//! - [`issue`] - Issue records
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use lll_lint_core::{CheckConfig, check};
//!
//! let files = vec![Utf8PathBuf::from("src/main.rs")];
//! let issues = check(&CheckConfig::default(), &files).expect("failed to check files");
//! for issue in &issues {
//!     println!("{issue}");
//! }
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod issue;
pub mod lint;
pub mod lll;
pub mod rules;

pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{CheckError, CheckResult, ConfigError, ConfigResult};
pub use issue::Issue;
pub use lll::{Check, CheckConfig, LineLengthChecker, check};
