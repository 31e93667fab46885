//! Rule sort-styles: keys of style-sheet declarations must be sorted
//!
//! Class names (the top-level keys of `StyleSheet.create({...})`) and style
//! properties (the keys of each class's object literal) are checked
//! independently. Spread members split a member list into segments that are
//! checked and fixed on their own; keys that cannot be resolved statically
//! are skipped without splitting.

mod fix;
mod keys;
mod locator;
mod order;
mod segments;
mod sort_styles_config;

pub use order::{Level, SortOrder};
pub use segments::{Segmentation, segment};
pub use sort_styles_config::SortStylesConfig;

use std::collections::HashMap;
use std::ops::Range;

use swc_core::ecma::ast::{CallExpr, Expr, ObjectLit, Prop, PropOrSpread};
use swc_core::ecma::visit::{Visit, VisitWith};

use crate::config::DEFAULT_STYLE_SHEET_OBJECT_NAME;
use crate::lint_context::LintContext;
use crate::rule::{Fix, FixCapability, LintError, LintResult, LintWarning, Rule, Severity};
use crate::rule_config_serde::RuleConfig;

/// One pair of adjacent keys found out of order
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub level: Level,
    /// Key that comes first in the source
    pub previous: String,
    /// Key that should have come before `previous`
    pub current: String,
    /// Byte range of the `current` key
    pub key_range: Range<usize>,
    /// Rewrite of the whole segment the pair belongs to
    pub fix: Option<Fix>,
}

impl Violation {
    pub fn message(&self, order: SortOrder) -> String {
        order::violation_message(self.level, order, &self.previous, &self.current)
    }
}

/// Check the class names of a style-sheet object
pub fn analyze_outer(ctx: &LintContext, object: &ObjectLit, order: SortOrder) -> Vec<Violation> {
    analyze_members(ctx, &object.props, Level::ClassNames, order)
}

/// Check the style properties of one class's object literal
pub fn analyze_inner(ctx: &LintContext, object: &ObjectLit, order: SortOrder) -> Vec<Violation> {
    analyze_members(ctx, &object.props, Level::StyleProperties, order)
}

fn analyze_members(ctx: &LintContext, members: &[PropOrSpread], level: Level, order: SortOrder) -> Vec<Violation> {
    let segmentation = segment(members, |member| matches!(member, PropOrSpread::Spread(_)));
    let mut violations = Vec::new();

    for range in segmentation.segments {
        let props: Vec<&Prop> = members[range]
            .iter()
            .filter_map(|member| match member {
                PropOrSpread::Prop(prop) => Some(&**prop),
                PropOrSpread::Spread(_) => None,
            })
            .collect();
        let keys: Vec<Option<String>> = props
            .iter()
            .map(|prop| keys::resolve_prop_key(prop, ctx.const_bindings()))
            .collect();

        let found = order::check_order(&keys, order);
        if found.is_empty() {
            continue;
        }

        let member_ranges: Vec<Range<usize>> = props.iter().map(|prop| ctx.node_range(*prop)).collect();
        let perm = fix::sorted_permutation(&keys, order);
        let segment_fix = fix::plan_segment_fix(ctx.content, &member_ranges, &perm);

        for pair in found {
            let (Some(previous), Some(current)) = (&keys[pair.previous], &keys[pair.current]) else {
                continue;
            };
            violations.push(Violation {
                level,
                previous: previous.clone(),
                current: current.clone(),
                key_range: ctx.span_range(keys::prop_key_span(props[pair.current])),
                fix: segment_fix.clone(),
            });
        }
    }

    violations
}

/// Rule sort-styles: Require style-sheet keys to be sorted
#[derive(Debug, Clone)]
pub struct SortStyles {
    config: SortStylesConfig,
    style_sheet_names: Vec<String>,
}

impl Default for SortStyles {
    fn default() -> Self {
        Self::from_config_struct(SortStylesConfig::default())
    }
}

impl SortStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a config struct, recognizing only the default factory name
    pub fn from_config_struct(config: SortStylesConfig) -> Self {
        Self {
            config,
            style_sheet_names: vec![DEFAULT_STYLE_SHEET_OBJECT_NAME.to_string()],
        }
    }

    /// Recognize calls on these objects instead of the default
    pub fn with_style_sheet_names(mut self, names: Vec<String>) -> Self {
        self.style_sheet_names = names;
        self
    }

    pub fn config(&self) -> &SortStylesConfig {
        &self.config
    }

    pub fn style_sheet_names(&self) -> &[String] {
        &self.style_sheet_names
    }

    /// Violations of one style-sheet declaration, class names first
    pub fn check_declaration(&self, ctx: &LintContext, object: &ObjectLit) -> Vec<Violation> {
        let order = self.config.order;
        let mut violations = Vec::new();

        if !self.config.ignore_class_names {
            violations.extend(analyze_outer(ctx, object, order));
        }

        if !self.config.ignore_style_properties {
            for member in &object.props {
                if let PropOrSpread::Prop(prop) = member
                    && let Prop::KeyValue(class) = &**prop
                    && let Expr::Object(styles) = &*class.value
                {
                    violations.extend(analyze_inner(ctx, styles, order));
                }
            }
        }

        violations
    }

    fn to_warning(&self, ctx: &LintContext, violation: Violation) -> LintWarning {
        let (line, column) = ctx.line_col(violation.key_range.start);
        let (end_line, end_column) = ctx.line_col(violation.key_range.end);

        LintWarning {
            message: violation.message(self.config.order),
            line,
            column,
            end_line,
            end_column,
            severity: Severity::Warning,
            fix: violation.fix,
            rule_name: Some(self.name().to_string()),
        }
    }
}

/// Walks every call expression and checks the style-sheet declarations among them
struct DeclarationVisitor<'r, 'c, 'a> {
    rule: &'r SortStyles,
    ctx: &'c LintContext<'a>,
    declarations: usize,
    violations: Vec<Violation>,
}

impl Visit for DeclarationVisitor<'_, '_, '_> {
    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Some(object) = locator::style_sheet_object(call, &self.rule.style_sheet_names) {
            self.declarations += 1;
            self.violations.extend(self.rule.check_declaration(self.ctx, object));
        }
        call.visit_children_with(self);
    }
}

impl Rule for SortStyles {
    fn name(&self) -> &'static str {
        SortStylesConfig::RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Style-sheet class names and style properties should be sorted"
    }

    fn check(&self, ctx: &LintContext) -> LintResult {
        let mut visitor = DeclarationVisitor {
            rule: self,
            ctx,
            declarations: 0,
            violations: Vec::new(),
        };
        ctx.program.visit_with(&mut visitor);
        log::trace!(
            "sort-styles: {} declaration(s), {} violation(s)",
            visitor.declarations,
            visitor.violations.len()
        );

        let mut warnings: Vec<LintWarning> = visitor
            .violations
            .into_iter()
            .map(|violation| self.to_warning(ctx, violation))
            .collect();
        warnings.sort_by_key(|w| (w.line, w.column));
        Ok(warnings)
    }

    fn fix(&self, ctx: &LintContext) -> Result<String, LintError> {
        let warnings = self.check(ctx)?;
        if warnings.is_empty() {
            return Ok(ctx.content.to_string());
        }
        crate::utils::fix_utils::apply_warning_fixes(ctx.content, &warnings).map_err(LintError::FixFailed)
    }

    fn fix_capability(&self) -> FixCapability {
        FixCapability::FullyFixable
    }

    fn should_skip(&self, content: &str) -> bool {
        !content.contains('{') || !self.style_sheet_names.iter().any(|name| content.contains(name.as_str()))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        let table = crate::rule_config_serde::config_schema_table(&SortStylesConfig::default())?;
        Some((SortStylesConfig::RULE_NAME.to_string(), toml::Value::Table(table)))
    }

    fn config_aliases(&self) -> Option<HashMap<String, String>> {
        Some(HashMap::from([
            ("ignoreClassNames".to_string(), "ignore-class-names".to_string()),
            ("ignoreStyleProperties".to_string(), "ignore-style-properties".to_string()),
        ]))
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config = crate::rule_config_serde::load_rule_config::<SortStylesConfig>(config);
        Box::new(Self::from_config_struct(rule_config).with_style_sheet_names(config.style_sheet_object_names()))
    }
}
