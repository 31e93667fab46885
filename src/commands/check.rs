//! Handler for the `check` and `fmt` commands.

use anyhow::Context;
use colored::*;
use std::io::{self, Read};
use std::path::Path;
use std::time::Instant;

use rnlint_lib::config as rnlint_config;
use rnlint_lib::exit_codes::exit;
use rnlint_lib::file_processor::{self, FileResult, PathFilter};
use rnlint_lib::output::{self, OutputFormat};
use rnlint_lib::rule::{LintWarning, Rule, Severity};
use rnlint_lib::utils::fix_utils;

use crate::cli_utils::{apply_cli_overrides, load_config_with_cli_error_handling_with_dir, print_validation_warnings};
use crate::{CheckArgs, FailOn, FixMode};

/// Totals gathered over one run
#[derive(Debug, Default)]
struct RunSummary {
    issues: usize,
    fixable: usize,
    files_with_issues: usize,
    files_checked: usize,
    fixed: usize,
    has_warnings: bool,
    has_errors: bool,
    had_tool_errors: bool,
}

impl RunSummary {
    fn record(&mut self, warnings: &[LintWarning], fixed: usize) {
        self.files_checked += 1;
        self.fixed += fixed;
        if warnings.is_empty() {
            return;
        }
        self.files_with_issues += 1;
        self.issues += warnings.len();
        self.fixable += fix_utils::fixable_count(warnings);
        self.has_warnings |= warnings
            .iter()
            .any(|w| matches!(w.severity, Severity::Warning | Severity::Error));
        self.has_errors |= warnings.iter().any(|w| w.severity == Severity::Error);
    }

    fn should_fail(&self, fail_on: FailOn) -> bool {
        match fail_on {
            FailOn::Never => false,
            FailOn::Error => self.has_errors,
            FailOn::Warning => self.has_warnings,
            FailOn::Any => self.issues > 0,
        }
    }
}

/// Run the check/fmt command.
pub fn run_check(args: &CheckArgs, global_config_path: Option<&str>, isolated: bool) {
    // 1. Use the first target path for config discovery
    let discovery_dir = args.paths.first().and_then(|first| {
        let first_path = Path::new(first);
        if first_path.is_dir() {
            Some(first_path)
        } else {
            first_path.parent().filter(|&parent| parent.is_dir())
        }
    });

    // 2. Load and validate configuration; warnings never stop the run
    let mut config = load_config_with_cli_error_handling_with_dir(global_config_path, isolated, discovery_dir);
    if !args.quiet {
        let registry = rnlint_config::default_registry();
        print_validation_warnings("config", &rnlint_config::validate_config(&config, registry));
        print_validation_warnings(
            "cli",
            &rnlint_config::validate_cli_rule_names(args.enable.as_deref(), args.disable.as_deref()),
        );
    }

    // 3. CLI flags override the config file
    apply_cli_overrides(&mut config, args);

    let all_rules = rnlint_lib::rules::all_rules(&config);
    let rules = rnlint_lib::rules::filter_rules(&all_rules, &config.global);
    if args.verbose {
        let names: Vec<&str> = rules.iter().map(|r| r.name()).collect();
        eprintln!("Enabled rules: {}", names.join(", "));
    }

    let result = if args.stdin {
        check_stdin(args, &config, &rules)
    } else {
        check_files(args, &config, &rules)
    };

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            exit::tool_error();
        }
    };

    if summary.had_tool_errors {
        exit::tool_error();
    }
    if summary.should_fail(args.fail_on) && args.fix_mode != FixMode::Format {
        exit::violations_found();
    }
}

fn check_stdin(args: &CheckArgs, config: &rnlint_config::Config, rules: &[Box<dyn Rule>]) -> anyhow::Result<RunSummary> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    let file_path = args.stdin_filename.as_deref().map(Path::new);
    let display_name = args.stdin_filename.as_deref().unwrap_or("<stdin>");

    let result = file_processor::process_content(&content, rules, config, file_path, args.fix)
        .with_context(|| format!("Failed to lint {display_name}"))?;

    let mut summary = RunSummary::default();
    summary.record(&result.warnings, result.fixed);

    if args.fix {
        // Fixed content goes to stdout, remaining diagnostics to stderr
        print!("{}", result.content);
        if !args.quiet {
            for warning in &result.warnings {
                eprintln!("{}", output::format_warning_text(display_name, warning));
            }
        }
        return Ok(summary);
    }

    match OutputFormat::from(args.output) {
        OutputFormat::Json => {
            println!("{}", output::format_json([(display_name, result.warnings.as_slice())])?);
        }
        OutputFormat::Text => {
            for warning in &result.warnings {
                println!("{}", output::format_warning_text(display_name, warning));
            }
        }
    }
    Ok(summary)
}

fn check_files(args: &CheckArgs, config: &rnlint_config::Config, rules: &[Box<dyn Rule>]) -> anyhow::Result<RunSummary> {
    let start = Instant::now();
    let filter = PathFilter::from_config(config).context("Invalid include/exclude pattern")?;
    let files = file_processor::find_source_files(&args.paths, &filter, config.global.respect_gitignore)?;

    if files.is_empty() {
        match OutputFormat::from(args.output) {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Text if !args.quiet => println!("No JavaScript or TypeScript files found to lint"),
            OutputFormat::Text => {}
        }
        return Ok(RunSummary::default());
    }

    let results = file_processor::process_files(&files, rules, config, args.fix);
    let project_root = config.project_root.as_deref();

    let mut summary = RunSummary::default();
    let mut reported: Vec<(String, &FileResult)> = Vec::new();
    for result in &results {
        let display = file_processor::to_display_path(&result.path.to_string_lossy(), project_root);
        if let Some(error) = &result.error {
            summary.had_tool_errors = true;
            eprintln!("{}: {}: {}", "Error".red().bold(), display, error);
            continue;
        }
        summary.record(&result.warnings, result.fixed);
        reported.push((display, result));
    }

    match OutputFormat::from(args.output) {
        OutputFormat::Json => {
            let json = output::format_json(
                reported
                    .iter()
                    .map(|(display, result)| (display.as_str(), result.warnings.as_slice())),
            )?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for (display, result) in &reported {
                for warning in &result.warnings {
                    println!("{}", output::format_warning_text(display, warning));
                }
            }
            if !args.quiet {
                if args.fix && summary.fixed > 0 {
                    println!(
                        "{} Fixed {} issue{}",
                        "Fixed:".green().bold(),
                        summary.fixed,
                        if summary.fixed == 1 { "" } else { "s" }
                    );
                }
                println!(
                    "{}",
                    output::format_summary(
                        summary.issues,
                        summary.files_with_issues,
                        summary.files_checked,
                        summary.fixable
                    )
                );
            }
        }
    }

    if args.verbose {
        eprintln!("Checked {} file(s) in {:?}", files.len(), start.elapsed());
    }
    Ok(summary)
}
