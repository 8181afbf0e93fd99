//! Shared output formatting for lint results.

use anyhow::Result;
use linebreak_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use miette::{NamedSource, Report};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base_dir` is where the relative paths of the result are rooted; text
/// output reads the files from there to render snippets.
pub fn print(result: &LintResult, format: OutputFormat, base_dir: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, base_dir),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, base_dir: &Path) {
    for group in result
        .violations
        .chunk_by(|a, b| a.location.file == b.location.file)
    {
        let Some(first) = group.first() else {
            continue;
        };
        match std::fs::read_to_string(base_dir.join(&first.location.file)) {
            Ok(content) => {
                let name = first.location.file.display().to_string();
                for violation in group {
                    println!("{}", render(violation, &name, &content));
                }
            }
            Err(e) => {
                tracing::debug!("No snippet for {}: {e}", first.location.file.display());
                for violation in group {
                    println!("{}", violation.format());
                }
            }
        }
    }

    let (errors, warnings, _) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{summary_color}Found {errors} error(s), {warnings} warning(s) in {} file(s) ({} fixable with --fix)\x1b[0m",
        result.files_checked,
        result.fixable_count()
    );
}

fn render(violation: &Violation, name: &str, content: &str) -> String {
    let severity = match violation.severity {
        Severity::Error => "\x1b[31merror\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
        Severity::Info => "\x1b[34minfo\x1b[0m",
    };
    let report = Report::new(ViolationDiagnostic::from(violation))
        .with_source_code(NamedSource::new(name, content.to_string()));
    format!(
        "{severity} {}:{}:{}\n{report:?}",
        violation.location.file.display(),
        violation.location.line,
        violation.location.column,
    )
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}
