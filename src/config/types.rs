use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::dialect::{SourceDialect, normalize_key};

/// Factory object name recognized when no settings are given
pub const DEFAULT_STYLE_SHEET_OBJECT_NAME: &str = "StyleSheet";

/// Config file names searched for, in priority order, in each directory
pub const CONFIG_FILES: &[&str] = &[".rnlint.toml", "rnlint.toml"];

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleConfig {
    /// Severity override for this rule (Error, Warning, or Info)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<crate::rule::Severity>,

    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Represents the complete configuration loaded from .rnlint.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Global configuration options
    #[serde(default)]
    pub global: GlobalConfig,

    /// Rule-specific configurations keyed by rule name (e.g. `sort-styles`)
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,

    /// Directory the config file was found in, used to resolve relative exclude patterns
    #[serde(skip)]
    pub project_root: Option<PathBuf>,

    /// Path of the loaded config file, if any
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Keys found in `[global]` that no option recognizes, reported by validation
    #[serde(skip)]
    pub unknown_global_keys: Vec<String>,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: toml::Table = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let mut config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.unknown_global_keys = raw
            .get("global")
            .and_then(|global| global.as_table())
            .map(|global| {
                global
                    .keys()
                    .filter(|key| !super::validation::is_known_global_key(key))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        config.rules = std::mem::take(&mut config.rules)
            .into_iter()
            .map(|(name, rule_config)| (normalize_key(&name), rule_config))
            .collect();
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.project_root = path.parent().map(Path::to_path_buf);
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the configuration the CLI should use.
    ///
    /// An explicit path always wins; `isolated` ignores config files entirely;
    /// otherwise the nearest config file above `discovery_dir` (or the working
    /// directory) is used, falling back to defaults.
    pub fn load_with_discovery(
        config_path: Option<&str>,
        discovery_dir: Option<&Path>,
        isolated: bool,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load(Path::new(path));
        }
        if isolated {
            log::debug!("Ignoring config files (isolated mode)");
            return Ok(Self::default());
        }

        let start = match discovery_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|source| ConfigError::IoError {
                source,
                path: ".".to_string(),
            })?,
        };

        match find_config_file(&start) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file found above {}, using defaults", start.display());
                Ok(Self::default())
            }
        }
    }

    /// Names of objects whose calls are treated as style-sheet factories
    pub fn style_sheet_object_names(&self) -> Vec<String> {
        if self.global.style_sheet_object_names.is_empty() {
            vec![DEFAULT_STYLE_SHEET_OBJECT_NAME.to_string()]
        } else {
            self.global.style_sheet_object_names.clone()
        }
    }

    /// Get the severity override for a specific rule, if configured
    pub fn get_rule_severity(&self, rule_name: &str) -> Option<crate::rule::Severity> {
        self.rules.get(&normalize_key(rule_name)).and_then(|r| r.severity)
    }

    /// Dialect for a file: the configured override, else detected from the extension
    pub fn get_dialect_for_file(&self, file_path: &Path) -> SourceDialect {
        self.global
            .dialect
            .unwrap_or_else(|| SourceDialect::from_path(file_path))
    }
}

/// Walk up from `start` looking for one of [`CONFIG_FILES`]
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        for name in CONFIG_FILES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Global configuration options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GlobalConfig {
    /// Enabled rules (empty means all rules)
    #[serde(default)]
    pub enable: Vec<String>,

    /// Disabled rules
    #[serde(default)]
    pub disable: Vec<String>,

    /// Files to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Files to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Respect .gitignore files when scanning directories
    #[serde(default = "default_respect_gitignore", alias = "respect_gitignore")]
    pub respect_gitignore: bool,

    /// Objects whose calls declare style sheets (e.g. `StyleSheet` for `StyleSheet.create`)
    #[serde(
        alias = "style_sheet_object_names",
        alias = "react-native/style-sheet-object-names"
    )]
    pub style_sheet_object_names: Vec<String>,

    /// Force a source dialect instead of detecting it from the file extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<SourceDialect>,

    /// Rules that are allowed to be fixed when --fix is used
    /// If specified, only these rules will be fixed
    #[serde(default)]
    pub fixable: Vec<String>,

    /// Rules that should never be fixed, even when --fix is used
    /// Takes precedence over fixable
    #[serde(default)]
    pub unfixable: Vec<String>,
}

fn default_respect_gitignore() -> bool {
    true
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            enable: Vec::new(),
            disable: Vec::new(),
            exclude: Vec::new(),
            include: Vec::new(),
            respect_gitignore: true,
            style_sheet_object_names: vec![DEFAULT_STYLE_SHEET_OBJECT_NAME.to_string()],
            dialect: None,
            fixable: Vec::new(),
            unfixable: Vec::new(),
        }
    }
}

/// Create a default configuration file at the specified path
pub fn create_default_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::FileExists { path: path.to_string() });
    }

    fs::write(path, generate_default_config()).map_err(|source| ConfigError::IoError {
        source,
        path: path.to_string(),
    })
}

/// Render the default configuration, one commented section per rule
pub fn generate_default_config() -> String {
    let mut output = String::from(
        r#"# rnlint configuration

[global]
# Objects whose calls declare style sheets, e.g. StyleSheet.create({...})
style-sheet-object-names = ["StyleSheet"]
# enable = []   # Only run these rules (empty means all)
disable = []
exclude = [
    "node_modules",
    "dist",
    "build",
]
respect-gitignore = true
"#,
    );

    for (name, schema) in &super::registry::default_registry().rule_schemas {
        output.push('\n');
        output.push_str(&format!("[{name}]\n"));
        for (key, value) in schema {
            output.push_str(&format!("{key} = {value}\n"));
        }
    }

    output
}

/// Get a rule-specific configuration value
/// Automatically tries both the original key and normalized variants (kebab-case ↔ snake_case)
pub fn get_rule_config_value<T: serde::de::DeserializeOwned>(config: &Config, rule_name: &str, key: &str) -> Option<T> {
    let rule_config = config.rules.get(&normalize_key(rule_name))?;

    let key_variants = [
        key.to_string(),
        normalize_key(key),
        key.replace('-', "_"),
        key.replace('_', "-"),
    ];

    for variant in &key_variants {
        if let Some(value) = rule_config.values.get(variant)
            && let Ok(result) = T::deserialize(value.clone())
        {
            return Some(result);
        }
    }

    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Configuration file already exists
    #[error("Configuration file already exists at {path}")]
    FileExists { path: String },
}
