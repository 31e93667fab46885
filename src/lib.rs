pub mod config;
pub mod exit_codes;
pub mod file_processor;
pub mod fix_coordinator;
pub mod lint_context;
pub mod output;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod utils;

pub use rules::*;

pub use crate::lint_context::LintContext;
use crate::config::{Config, SourceDialect};
use crate::rule::{LintResult, LintWarning, Rule};
use std::path::PathBuf;
use std::time::Instant;

/// Lint source text against the given rules
///
/// Assumes the provided `rules` vector contains the final, configured and
/// filtered set of rules to be executed.
pub fn lint(
    content: &str,
    rules: &[Box<dyn Rule>],
    verbose: bool,
    dialect: SourceDialect,
    config: Option<&Config>,
) -> LintResult {
    lint_file(content, rules, verbose, dialect, None, config)
}

/// Lint the contents of `source_file`.
///
/// The file is only parsed when at least one rule applies to its content, as
/// decided by each rule's [`Rule::should_skip`]; a file that does not mention
/// any style-sheet object is never parsed. Parse failures are returned as
/// [`rule::LintError::ParsingError`]. Warnings are ordered by position, with
/// configured severity overrides applied.
pub fn lint_file(
    content: &str,
    rules: &[Box<dyn Rule>],
    verbose: bool,
    dialect: SourceDialect,
    source_file: Option<PathBuf>,
    config: Option<&Config>,
) -> LintResult {
    let mut warnings: Vec<LintWarning> = Vec::new();

    if content.trim().is_empty() {
        return Ok(warnings);
    }

    let applicable_rules: Vec<&dyn Rule> = rules
        .iter()
        .map(|rule| rule.as_ref())
        .filter(|rule| !rule.should_skip(content))
        .collect();

    if applicable_rules.is_empty() {
        if verbose {
            log::debug!("Skipped all {} rules based on content analysis", rules.len());
        }
        return Ok(warnings);
    }

    let parse_start = Instant::now();
    let lint_ctx = LintContext::new(content, dialect, source_file)?;
    log::trace!("Parsed {} bytes in {:?}", content.len(), parse_start.elapsed());

    for rule in applicable_rules {
        let rule_start = Instant::now();
        let rule_warnings = rule.check(&lint_ctx).inspect_err(|e| {
            log::error!("Error checking rule {}: {}", rule.name(), e);
        })?;

        warnings.extend(rule_warnings.into_iter().map(|mut warning| {
            // Apply severity override from config if present
            if let Some(cfg) = config {
                let rule_name_to_check = warning.rule_name.as_deref().unwrap_or(rule.name());
                if let Some(override_severity) = cfg.get_rule_severity(rule_name_to_check) {
                    warning.severity = override_severity;
                }
            }
            warning
        }));

        let rule_duration = rule_start.elapsed();
        if verbose && rule_duration.as_millis() > 500 {
            log::debug!("Rule {} took {:?}", rule.name(), rule_duration);
        }
    }

    warnings.sort_by(|a, b| (a.line, a.column).cmp(&(b.line, b.column)));
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{LintError, Severity};

    fn default_rules() -> Vec<Box<dyn Rule>> {
        rules::all_rules(&Config::default())
    }

    #[test]
    fn test_lint_reports_sorted_warnings() {
        let content = "const s = StyleSheet.create({\n  b: { y: 1, x: 2 },\n  a: {},\n});\n";
        let warnings = lint(content, &default_rules(), false, SourceDialect::JavaScript, None).unwrap();

        let positions: Vec<(usize, usize)> = warnings.iter().map(|w| (w.line, w.column)).collect();
        assert_eq!(positions, vec![(2, 14), (3, 3)]);
        assert!(warnings.iter().all(|w| w.rule_name.as_deref() == Some("sort-styles")));
    }

    #[test]
    fn test_content_without_style_sheets_is_not_parsed() {
        // Not valid JavaScript, but never parsed because no rule applies
        let content = "this is { not javascript";
        let warnings = lint(content, &default_rules(), false, SourceDialect::JavaScript, None).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_parse_errors_are_returned() {
        let content = "const s = StyleSheet.create({ a: {} ;";
        let result = lint(content, &default_rules(), false, SourceDialect::JavaScript, None);
        assert!(matches!(result, Err(LintError::ParsingError(_))));
    }

    #[test]
    fn test_severity_override() {
        let config = Config::from_toml_str("[sort-styles]\nseverity = \"error\"\n").unwrap();
        let rules = rules::all_rules(&config);
        let content = "StyleSheet.create({ b: {}, a: {} });";
        let warnings = lint(content, &rules, false, SourceDialect::JavaScript, Some(&config)).unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Error);
    }

    #[test]
    fn test_configured_names_drive_the_prescan() {
        let config = Config::from_toml_str("[global]\nstyle-sheet-object-names = [\"Sheet\"]\n").unwrap();
        let rules = rules::all_rules(&config);

        let content = "Sheet.create({ b: {}, a: {} });";
        let warnings = lint(content, &rules, false, SourceDialect::JavaScript, Some(&config)).unwrap();
        assert_eq!(warnings.len(), 1);

        let content = "StyleSheet.create({ b: {}, a: {} });";
        let warnings = lint(content, &rules, false, SourceDialect::JavaScript, Some(&config)).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_rule_names_decide_applicability_without_config() {
        let rules: Vec<Box<dyn Rule>> =
            vec![Box::new(SortStyles::new().with_style_sheet_names(vec!["Sheet".to_string()]))];

        let content = "const s = Sheet.create({ b: {}, a: {} });";
        let warnings = lint(content, &rules, false, SourceDialect::JavaScript, None).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "Expected class names to be in ascending order. 'a' should be before 'b'."
        );

        // The default name is not recognized by this rule, so nothing is parsed
        let content = "StyleSheet.create({ b: {}, a: {} }) +;";
        let warnings = lint(content, &rules, false, SourceDialect::JavaScript, None).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(lint("", &default_rules(), false, SourceDialect::JavaScript, None).unwrap().is_empty());
        assert!(lint("  \n", &default_rules(), false, SourceDialect::JavaScript, None).unwrap().is_empty());
    }
}
