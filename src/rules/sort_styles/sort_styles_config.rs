use serde::{Deserialize, Serialize};

use super::order::SortOrder;
use crate::rule::LintError;
use crate::rule_config_serde::RuleConfig;

/// Configuration for sort-styles
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct SortStylesConfig {
    /// Direction keys must be sorted in: "asc" (default) or "desc"
    #[serde(default)]
    pub order: SortOrder,

    /// Skip the check of top-level class names
    #[serde(default, alias = "ignore_class_names", alias = "ignoreClassNames")]
    pub ignore_class_names: bool,

    /// Skip the check of style properties inside each class
    #[serde(default, alias = "ignore_style_properties", alias = "ignoreStyleProperties")]
    pub ignore_style_properties: bool,
}

impl RuleConfig for SortStylesConfig {
    const RULE_NAME: &'static str = "sort-styles";
}

/// Second positional option: `{ "ignoreClassNames": bool, "ignoreStyleProperties": bool }`
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct IgnoreOptions {
    ignore_class_names: bool,
    ignore_style_properties: bool,
}

impl SortStylesConfig {
    /// Build the config from positional options such as `["desc", { "ignoreClassNames": true }]`.
    ///
    /// Missing options keep their defaults; anything else is rejected.
    pub fn from_rule_options(options: &[serde_json::Value]) -> Result<Self, LintError> {
        if options.len() > 2 {
            return Err(LintError::InvalidInput(format!(
                "sort-styles accepts at most 2 options, got {}",
                options.len()
            )));
        }

        let mut config = Self::default();

        if let Some(order) = options.first() {
            let order = order
                .as_str()
                .ok_or_else(|| LintError::InvalidInput(format!("sort-styles order must be a string, got {order}")))?;
            config.order = order.parse().map_err(LintError::InvalidInput)?;
        }

        if let Some(flags) = options.get(1) {
            let flags: IgnoreOptions = serde_json::from_value(flags.clone())
                .map_err(|e| LintError::InvalidInput(format!("Invalid sort-styles options: {e}")))?;
            config.ignore_class_names = flags.ignore_class_names;
            config.ignore_style_properties = flags.ignore_style_properties;
        }

        Ok(config)
    }
}
