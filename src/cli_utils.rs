//! Shared CLI utility functions used across command handlers.

use colored::*;
use std::path::Path;

use rnlint_lib::config as rnlint_config;
use rnlint_lib::exit_codes::exit;

use crate::CheckArgs;

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Apply CLI argument overrides to a loaded config.
///
/// List flags replace the configured lists, except `--exclude`, which adds
/// to the configured patterns.
pub fn apply_cli_overrides(config: &mut rnlint_config::Config, args: &CheckArgs) {
    if let Some(dialect) = args.dialect {
        config.global.dialect = Some(dialect.into());
    }

    if let Some(respect_gitignore) = args.respect_gitignore {
        config.global.respect_gitignore = respect_gitignore;
    }

    if let Some(ref enable) = args.enable {
        config.global.enable = split_list(enable);
    }

    if let Some(ref disable) = args.disable {
        config.global.disable = split_list(disable);
    }

    if let Some(ref fixable) = args.fixable {
        config.global.fixable = split_list(fixable);
    }

    if let Some(ref unfixable) = args.unfixable {
        config.global.unfixable = split_list(unfixable);
    }

    if let Some(ref exclude) = args.exclude {
        config.global.exclude.extend(split_list(exclude));
    }

    if let Some(ref include) = args.include {
        config.global.include = split_list(include);
    }

    if let Some(ref names) = args.style_sheet_object_names {
        config.global.style_sheet_object_names = split_list(names);
    }
}

/// Load configuration with standard CLI error handling, optionally using a discovery directory.
pub fn load_config_with_cli_error_handling_with_dir(
    config_path: Option<&str>,
    isolated: bool,
    discovery_dir: Option<&Path>,
) -> rnlint_config::Config {
    match rnlint_config::Config::load_with_discovery(config_path, discovery_dir, isolated) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "Config error".red().bold(), e);
            exit::tool_error();
        }
    }
}

/// Print config or CLI validation warnings to stderr
pub fn print_validation_warnings(label: &str, warnings: &[rnlint_config::ConfigValidationWarning]) {
    for warn in warnings {
        eprintln!("{} {}", format!("[{label} warning]").yellow(), warn.message);
    }
}
