//! Configuration loading, discovery and validation for rnlint.

mod dialect;
mod registry;
mod types;
mod validation;

pub use dialect::{SourceDialect, normalize_key};
pub use registry::{RuleRegistry, default_registry, is_valid_rule_name, resolve_rule_name};
pub use types::{
    CONFIG_FILES, Config, ConfigError, DEFAULT_STYLE_SHEET_OBJECT_NAME, GlobalConfig, RuleConfig,
    create_default_config, find_config_file, generate_default_config, get_rule_config_value,
};
pub use validation::{ConfigValidationWarning, suggest_similar_key, validate_cli_rule_names, validate_config};
