//! Check command — report long lines in the given files.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use lll_lint_core::config::Config;
use lll_lint_core::lint::{self, LintReport, OnError};
use lll_lint_core::rules::RuleSet;
use lll_lint_core::{CheckConfig, Issue};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to check.
    #[arg(required = true)]
    pub files: Vec<Utf8PathBuf>,

    /// Maximum line length (overrides config).
    #[arg(long, value_name = "N")]
    pub line_length: Option<usize>,

    /// Characters counted per tab (overrides config).
    #[arg(long, value_name = "N")]
    pub tab_width: Option<usize>,

    /// Keep going when a file cannot be read instead of stopping.
    #[arg(long)]
    pub keep_going: bool,
}

/// Check files for lines longer than the limit.
#[instrument(name = "cmd_check", skip_all, fields(files = args.files.len()))]
pub fn cmd_check(
    args: CheckArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let base = config.check_config().context("invalid configuration")?;
    let base = CheckConfig::new(
        args.line_length.unwrap_or(base.max_line_length),
        args.tab_width.unwrap_or(base.tab_width),
    )
    .context("invalid --line-length")?;
    debug!(
        line_length = base.max_line_length,
        tab_width = base.tab_width,
        keep_going = args.keep_going,
        "executing check command"
    );

    let rules = config
        .rules
        .as_deref()
        .map(RuleSet::compile)
        .unwrap_or_default();
    let on_error = if args.keep_going {
        OnError::Continue
    } else {
        OnError::Abort
    };

    let progress = progress_bar(args.files.len(), global_json || quiet);
    let report = lint::run_lint(&args.files, base, &rules, on_error, |_| progress.inc(1));
    progress.finish_and_clear();
    let report = report?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, quiet);
    }

    if !report.pass {
        bail!("{}", summary(&report));
    }
    Ok(())
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden || len < 2 {
        return ProgressBar::hidden();
    }
    let style = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} files")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(len as u64).with_style(style)
}

fn print_report(report: &LintReport, quiet: bool) {
    for issue in &report.issues {
        println!("{}", render_issue(issue));
    }
    for failure in &report.failures {
        eprintln!("{} {}", "ERROR:".red(), failure.error);
    }
    if report.pass && !quiet {
        println!(
            "{} {} checked, {} skipped",
            "PASS:".green(),
            plural(report.files_checked, "file"),
            report.files_skipped,
        );
    }
}

fn render_issue(issue: &Issue) -> String {
    let location = if issue.column > 0 {
        format!("{}:{}:{}", issue.file, issue.line, issue.column)
    } else {
        format!("{}:{}", issue.file, issue.line)
    };
    let source = format!("({})", issue.source);
    format!(
        "{}: {} {}",
        location.if_supports_color(Stream::Stdout, |t| t.bold()),
        issue.message,
        source.if_supports_color(Stream::Stdout, |t| t.dimmed())
    )
}

fn summary(report: &LintReport) -> String {
    let mut parts = Vec::new();
    if !report.issues.is_empty() {
        parts.push(plural(report.issues.len(), "long line"));
    }
    if !report.failures.is_empty() {
        parts.push(format!("{} unreadable", plural(report.failures.len(), "file")));
    }
    format!("{} found", parts.join(" and "))
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
