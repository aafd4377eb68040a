//! `navcheck check` command implementation.

use clap::{Args, ValueEnum};
use navcheck_config::{CheckConfig, CliSettings};
use navcheck_site::{DiagnosticKind, Report, ValidateOptions, validate};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Report output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportFormat {
    /// Colored, human readable report on stderr.
    #[default]
    Text,
    /// JSON report on stdout.
    Json,
}

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Glob for pages allowed to be missing from the navigation (repeatable).
    #[arg(long = "allow-orphan", value_name = "GLOB")]
    allow_orphans: Vec<String>,

    /// Fail when orphan pages are found.
    #[arg(long)]
    deny_orphans: bool,

    /// Only report orphan pages, never fail on them.
    #[arg(long, conflicts_with = "deny_orphans")]
    no_deny_orphans: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, or [`CliError::CheckFailed`] when
    /// the report contains diagnostics the configuration treats as fatal.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let settings = CliSettings {
            allow_orphans: self.allow_orphans.clone(),
            deny_orphans: self.resolve_deny_orphans(),
            ..Default::default()
        };
        let loaded = self.source.load(settings)?;

        let options =
            ValidateOptions::from_patterns(loaded.config.check.allow_orphan_patterns.clone());
        let report = validate(&loaded.site, &loaded.content, &options);

        match self.format {
            ReportFormat::Text => print_text_report(&output, &report),
            ReportFormat::Json => output.data(&serde_json::to_string_pretty(&report)?),
        }

        check_outcome(&report, &loaded.config.check)
    }

    /// Resolve `deny_orphans` from --deny-orphans/--no-deny-orphans flags.
    fn resolve_deny_orphans(&self) -> Option<bool> {
        if self.deny_orphans {
            Some(true)
        } else if self.no_deny_orphans {
            Some(false)
        } else {
            None
        }
    }
}

/// Print diagnostics grouped by kind, followed by a summary line.
fn print_text_report(output: &Output, report: &Report) {
    for diagnostic in report.of_kind(DiagnosticKind::BrokenLink) {
        output.error(&format!("broken link: {}", diagnostic.path));
        if let Some(location) = &diagnostic.location {
            output.detail(&format!("    in {location}"));
        }
    }
    for diagnostic in report.of_kind(DiagnosticKind::OrphanPage) {
        output.warning(&format!("orphan page: {}", diagnostic.path));
    }

    let summary = summary_line(report);
    if report.is_clean() {
        output.success(&summary);
    } else {
        output.info(&summary);
    }
}

/// One-line summary of a report.
fn summary_line(report: &Report) -> String {
    format!(
        "Checked {} link(s) against {} page(s): {} broken link(s), {} orphan page(s)",
        report.links_checked,
        report.pages_checked,
        report.count(DiagnosticKind::BrokenLink),
        report.count(DiagnosticKind::OrphanPage),
    )
}

/// Decide whether the report fails the run.
fn check_outcome(report: &Report, check: &CheckConfig) -> Result<(), CliError> {
    let broken = report.count(DiagnosticKind::BrokenLink);
    let orphans = report.count(DiagnosticKind::OrphanPage);

    let fails = (check.fail_on_broken_links && broken > 0) || (check.deny_orphans && orphans > 0);
    if fails {
        return Err(CliError::CheckFailed { broken, orphans });
    }
    Ok(())
}
