use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

use crate::lint_context::LintContext;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Fix failed: {0}")]
    FixFailed(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parsing error: {0}")]
    ParsingError(String),
}

pub type LintResult = Result<Vec<LintWarning>, LintError>;

/// A single diagnostic produced by a rule.
///
/// Lines and columns are 1-indexed; columns count characters, not bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LintWarning {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub severity: Severity,
    pub fix: Option<Fix>,
    pub rule_name: Option<String>,
}

/// A text replacement over a byte range of the original content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fix {
    pub range: Range<usize>,
    pub replacement: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Whether a rule can repair what it reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixCapability {
    FullyFixable,
    ConditionallyFixable,
    Unfixable,
}

pub trait Rule: DynClone + Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, ctx: &LintContext) -> LintResult;

    fn fix(&self, ctx: &LintContext) -> Result<String, LintError>;

    fn fix_capability(&self) -> FixCapability {
        FixCapability::FullyFixable
    }

    /// Check if this rule can be skipped for `content` without parsing it
    fn should_skip(&self, _content: &str) -> bool {
        false
    }

    fn as_any(&self) -> &dyn std::any::Any;

    /// Default configuration section for this rule, used by `init` and config validation
    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        None
    }

    /// Config key aliases (alias -> canonical key) accepted by this rule
    fn config_aliases(&self) -> Option<std::collections::HashMap<String, String>> {
        None
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;
}

dyn_clone::clone_trait_object!(Rule);
