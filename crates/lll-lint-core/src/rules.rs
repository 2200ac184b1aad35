//! Rule resolution engine.
//!
//! Matches file paths against configured glob rules and accumulates
//! per-path overrides. When multiple rules match, all contribute.
//! Conflicts (same setting in multiple rules) are resolved by specificity:
//! the pattern with more literal (non-wildcard) path segments wins. Ties go
//! to the earlier rule.

use globset::{Glob, GlobMatcher};

use crate::config::Rule;
use crate::lll::CheckConfig;

/// Compiled rule set for efficient matching.
#[derive(Default)]
pub struct RuleSet {
    compiled: Vec<CompiledRule>,
}

/// A single rule with pre-compiled glob matchers.
struct CompiledRule {
    matchers: Vec<(GlobMatcher, usize)>, // (matcher, specificity)
    rule: Rule,
}

/// Accumulated overrides after rule resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolvedOverrides {
    /// Line length override.
    pub line_length: Option<usize>,
    /// Tab width override.
    pub tab_width: Option<usize>,
    /// Whether the file is excluded from checking.
    pub skip: Option<bool>,
}

impl ResolvedOverrides {
    /// Returns `true` if no rule contributed anything.
    pub const fn is_empty(&self) -> bool {
        self.line_length.is_none() && self.tab_width.is_none() && self.skip.is_none()
    }

    /// Apply the overrides on top of `base`.
    ///
    /// Returns `None` when the file should not be checked at all.
    pub fn apply(&self, base: CheckConfig) -> Option<CheckConfig> {
        if self.skip == Some(true) {
            return None;
        }
        Some(CheckConfig {
            max_line_length: self.line_length.unwrap_or(base.max_line_length),
            tab_width: self.tab_width.unwrap_or(base.tab_width),
        })
    }
}

/// Count literal (non-wildcard) path segments in a glob pattern.
///
/// `vendor/gen/*.go` → 2 (`vendor`, `gen`)
/// `vendor/**/*.go` → 1 (`vendor`)
/// `**/*.go` → 0
fn specificity(pattern: &str) -> usize {
    pattern
        .split('/')
        .filter(|seg| !seg.contains('*') && !seg.contains('?') && !seg.contains('['))
        .count()
}

/// Take `candidate` when nothing has been chosen yet or it is strictly more specific.
fn pick<T: Copy>(
    slot: &mut Option<T>,
    slot_spec: &mut Option<usize>,
    candidate: Option<T>,
    spec: usize,
) {
    if let Some(value) = candidate
        && slot_spec.is_none_or(|prev| spec > prev)
    {
        *slot = Some(value);
        *slot_spec = Some(spec);
    }
}

impl RuleSet {
    /// Compile a list of rules into a `RuleSet`.
    ///
    /// Invalid glob patterns are skipped with a tracing warning.
    pub fn compile(rules: &[Rule]) -> Self {
        let compiled = rules
            .iter()
            .filter_map(|rule| {
                let matchers: Vec<(GlobMatcher, usize)> = rule
                    .paths
                    .iter()
                    .filter_map(|pattern| match Glob::new(pattern) {
                        Ok(glob) => Some((glob.compile_matcher(), specificity(pattern))),
                        Err(e) => {
                            tracing::warn!(pattern, error = %e, "skipping invalid glob pattern");
                            None
                        }
                    })
                    .collect();
                if matchers.is_empty() {
                    None
                } else {
                    Some(CompiledRule {
                        matchers,
                        rule: rule.clone(),
                    })
                }
            })
            .collect();
        Self { compiled }
    }

    /// Number of rules that compiled with at least one usable pattern.
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    /// Returns `true` if no rules compiled.
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Resolve which overrides apply to a file path.
    ///
    /// A leading `./` is ignored so `./gen/a.go` matches `gen/**`.
    pub fn resolve(&self, file_path: &str) -> ResolvedOverrides {
        let file_path = file_path.strip_prefix("./").unwrap_or(file_path);
        let mut result = ResolvedOverrides::default();

        let mut line_length_spec: Option<usize> = None;
        let mut tab_width_spec: Option<usize> = None;
        let mut skip_spec: Option<usize> = None;

        for compiled in &self.compiled {
            let max_spec = compiled
                .matchers
                .iter()
                .filter(|(m, _)| m.is_match(file_path))
                .map(|(_, s)| *s)
                .max();

            let Some(spec) = max_spec else {
                continue;
            };

            let rule = &compiled.rule;
            pick(&mut result.line_length, &mut line_length_spec, rule.line_length, spec);
            pick(&mut result.tab_width, &mut tab_width_spec, rule.tab_width, spec);
            pick(&mut result.skip, &mut skip_spec, rule.skip, spec);
        }

        result
    }
}
