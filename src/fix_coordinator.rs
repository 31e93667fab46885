use crate::config::Config;
use crate::lint_context::LintContext;
use crate::rule::Rule;
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Maximum number of fix iterations before stopping
const MAX_ITERATIONS: usize = 100;

/// Result of applying fixes iteratively
#[derive(Debug, Clone)]
pub struct FixResult {
    /// Total number of rule fixes that changed the content
    pub rules_fixed: usize,
    /// Number of fix iterations performed
    pub iterations: usize,
    /// Number of LintContext instances created (one parse each)
    pub context_creations: usize,
    /// Names of rules that applied fixes
    pub fixed_rule_names: HashSet<String>,
    /// Whether the fix process converged (content stabilized)
    pub converged: bool,
    /// Rules identified as participants in an oscillation cycle.
    /// Empty when the loop hit `max_iterations` without cycling.
    pub conflicting_rules: Vec<String>,
    /// Ordered rule sequence observed in the cycle
    pub conflict_cycle: Vec<String>,
}

impl FixResult {
    fn finish(
        rules_fixed: usize,
        iterations: usize,
        context_creations: usize,
        fixed_rule_names: HashSet<String>,
        converged: bool,
    ) -> Self {
        Self {
            rules_fixed,
            iterations,
            context_creations,
            fixed_rule_names,
            converged,
            conflicting_rules: Vec::new(),
            conflict_cycle: Vec::new(),
        }
    }
}

/// Calculate hash of content for convergence detection
fn hash_content(content: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    hasher.finish()
}

/// Re-runs rule fixes until the source stops changing.
///
/// A fix for a style-sheet can overlap another one (an outer reorder moving a
/// class whose properties are also reordered); overlapping fixes are deferred
/// by the rule and picked up on the next pass here.
#[derive(Debug, Default)]
pub struct FixCoordinator;

impl FixCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Apply fixes iteratively until no more fixes are needed or max iterations reached.
    ///
    /// Every iteration re-parses the content and re-checks all rules, restarting
    /// from the first rule after any fix. The dialect is resolved per file with
    /// `config.get_dialect_for_file()` when `file_path` is given.
    ///
    /// Returns an error if the content (original or rewritten) fails to parse.
    pub fn apply_fixes_iterative(
        &self,
        rules: &[Box<dyn Rule>],
        content: &mut String,
        config: &Config,
        max_iterations: usize,
        file_path: Option<&std::path::Path>,
    ) -> Result<FixResult, String> {
        let max_iterations = max_iterations.min(MAX_ITERATIONS);

        let mut total_fixed = 0;
        let mut total_ctx_creations = 0;
        let mut iterations = 0;

        // History of (content_hash, rule_that_produced_this_state); the initial
        // state has no producing rule.
        let mut history: Vec<(u64, String)> = vec![(hash_content(content), String::new())];
        let mut fixed_rule_names = HashSet::new();

        let unfixable_rules: HashSet<String> = config
            .global
            .unfixable
            .iter()
            .map(|s| crate::config::resolve_rule_name(s))
            .collect();
        let fixable_rules: HashSet<String> = config
            .global
            .fixable
            .iter()
            .map(|s| crate::config::resolve_rule_name(s))
            .collect();
        let has_fixable_allowlist = !fixable_rules.is_empty();

        let dialect = file_path
            .map(|p| config.get_dialect_for_file(p))
            .unwrap_or_else(|| config.global.dialect.unwrap_or_default());

        while iterations < max_iterations {
            iterations += 1;

            let ctx = LintContext::new(content, dialect, file_path.map(|p| p.to_path_buf()))
                .map_err(|e| e.to_string())?;
            total_ctx_creations += 1;

            let mut any_fix_applied = false;
            let mut this_iter_rule = String::new();

            for rule in rules {
                if unfixable_rules.contains(rule.name()) {
                    continue;
                }
                if has_fixable_allowlist && !fixable_rules.contains(rule.name()) {
                    continue;
                }
                if rule.should_skip(ctx.content) {
                    continue;
                }

                let warnings = match rule.check(&ctx) {
                    Ok(w) => w,
                    Err(e) => {
                        log::warn!("Rule {} failed during fix check: {}", rule.name(), e);
                        continue;
                    }
                };
                if !warnings.iter().any(|w| w.fix.is_some()) {
                    continue;
                }

                match rule.fix(&ctx) {
                    Ok(fixed_content) => {
                        if fixed_content != *content {
                            *content = fixed_content;
                            total_fixed += 1;
                            any_fix_applied = true;
                            this_iter_rule = rule.name().to_string();
                            fixed_rule_names.insert(rule.name().to_string());
                            // Restart from the first rule with the new content
                            break;
                        }
                    }
                    Err(e) => {
                        log::warn!("Rule {} failed to fix: {}", rule.name(), e);
                        continue;
                    }
                }
            }

            let current_hash = hash_content(content);

            if let Some(cycle_start) = history.iter().position(|(h, _)| *h == current_hash) {
                if cycle_start == history.len() - 1 {
                    // Nothing changed this iteration
                    return Ok(FixResult::finish(
                        total_fixed,
                        iterations,
                        total_ctx_creations,
                        fixed_rule_names,
                        true,
                    ));
                }

                // Content returned to an older state: oscillation
                let conflict_cycle: Vec<String> = history[cycle_start + 1..]
                    .iter()
                    .map(|(_, r)| r.clone())
                    .chain(std::iter::once(this_iter_rule))
                    .filter(|r| !r.is_empty())
                    .collect();
                let mut conflicting_rules: Vec<String> = conflict_cycle
                    .iter()
                    .cloned()
                    .collect::<HashSet<_>>()
                    .into_iter()
                    .collect();
                conflicting_rules.sort();
                log::debug!("Fix loop oscillation between {}", conflict_cycle.join(" -> "));

                return Ok(FixResult {
                    conflicting_rules,
                    conflict_cycle,
                    ..FixResult::finish(total_fixed, iterations, total_ctx_creations, fixed_rule_names, false)
                });
            }

            history.push((current_hash, this_iter_rule));

            if !any_fix_applied {
                return Ok(FixResult::finish(
                    total_fixed,
                    iterations,
                    total_ctx_creations,
                    fixed_rule_names,
                    true,
                ));
            }
        }

        log::debug!("Fix loop stopped after {iterations} iterations without converging");
        Ok(FixResult::finish(
            total_fixed,
            iterations,
            total_ctx_creations,
            fixed_rule_names,
            false,
        ))
    }
}
