//! Rendering of lint results for the terminal and for tools.

use colored::*;
use serde::Serialize;
use std::str::FromStr;

use crate::rule::{LintWarning, Severity};

/// Output format for linting results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `path:line:col: [rule] message [*]`, one warning per line
    #[default]
    Text,
    /// JSON array of all warnings, collected across files
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Format one warning as a text line. Fixable warnings are marked with `[*]`.
pub fn format_warning_text(path: &str, warning: &LintWarning) -> String {
    let rule = warning.rule_name.as_deref().unwrap_or("unknown");
    let rule_tag = match warning.severity {
        Severity::Error => format!("[{rule}]").red().bold(),
        Severity::Warning => format!("[{rule}]").yellow(),
        Severity::Info => format!("[{rule}]").cyan(),
    };
    let fixable = if warning.fix.is_some() {
        format!(" {}", "[*]".green())
    } else {
        String::new()
    };

    format!(
        "{}:{}:{}: {} {}{}",
        path.blue().underline(),
        warning.line.to_string().cyan(),
        warning.column.to_string().cyan(),
        rule_tag,
        warning.message,
        fixable
    )
}

/// One warning in the JSON report
#[derive(Debug, Serialize)]
struct JsonWarning<'a> {
    file: &'a str,
    line: usize,
    column: usize,
    end_line: usize,
    end_column: usize,
    rule: &'a str,
    message: &'a str,
    severity: Severity,
    fixable: bool,
}

/// Render all warnings, grouped by file in the given order, as a JSON array
pub fn format_json<'a, I>(results: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = (&'a str, &'a [LintWarning])>,
{
    let warnings: Vec<JsonWarning<'a>> = results
        .into_iter()
        .flat_map(|(file, warnings)| {
            warnings.iter().map(move |w| JsonWarning {
                file,
                line: w.line,
                column: w.column,
                end_line: w.end_line,
                end_column: w.end_column,
                rule: w.rule_name.as_deref().unwrap_or("unknown"),
                message: &w.message,
                severity: w.severity,
                fixable: w.fix.is_some(),
            })
        })
        .collect();
    serde_json::to_string_pretty(&warnings)
}

/// Closing summary line of a text report
pub fn format_summary(issues: usize, files_with_issues: usize, files_checked: usize, fixable: usize) -> String {
    if issues == 0 {
        return format!(
            "{} No issues found in {} file{}",
            "Success:".green().bold(),
            files_checked,
            plural(files_checked)
        );
    }

    let mut summary = format!(
        "{} Found {} issue{} in {} file{} ({} file{} checked)",
        "Issues:".yellow().bold(),
        issues,
        plural(issues),
        files_with_issues,
        plural(files_with_issues),
        files_checked,
        plural(files_checked)
    );
    if fixable > 0 {
        summary.push_str(&format!("\nRun `rnlint check --fix` to fix {fixable} of them automatically"));
    }
    summary
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
