//! Shared output formatting for batch reports.

use anyhow::Result;
use tokenlint_core::{BatchReport, Severity};

use crate::OutputFormat;

/// Print a batch report in the specified format.
pub fn print(report: &BatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    }
}

fn print_text(report: &BatchReport) {
    for issue in report.issues() {
        println!("{} {} at `{}`", issue.code.code(), issue.code, issue.path);
        println!(
            "  {}: {}",
            severity_indicator(issue.severity),
            issue.message
        );
        if let Some(suggestion) = &issue.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    let (errors, warnings) = report.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Checked {} token(s): {} valid, {} invalid, {} with warnings ({} error(s), {} warning(s))\x1b[0m",
        summary_color,
        report.summary.total,
        report.summary.valid,
        report.summary.invalid,
        report.summary.with_warnings,
        errors,
        warnings
    );
}

fn print_json(report: &BatchReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &BatchReport) {
    for issue in report.issues() {
        println!(
            "{}: {} [{}] {}",
            issue.path,
            issue.severity,
            issue.code.code(),
            issue.message,
        );
    }
}
