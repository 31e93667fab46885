use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source dialect used to pick the parser syntax for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceDialect {
    /// JavaScript with JSX enabled (.js, .jsx, .mjs, .cjs)
    #[serde(rename = "javascript", alias = "js", alias = "jsx")]
    #[default]
    JavaScript,
    /// TypeScript without JSX (.ts, .mts, .cts)
    #[serde(rename = "typescript", alias = "ts")]
    TypeScript,
    /// TypeScript with JSX (.tsx)
    #[serde(rename = "tsx")]
    Tsx,
}

impl fmt::Display for SourceDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDialect::JavaScript => write!(f, "javascript"),
            SourceDialect::TypeScript => write!(f, "typescript"),
            SourceDialect::Tsx => write!(f, "tsx"),
        }
    }
}

impl FromStr for SourceDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" | "jsx" => Ok(SourceDialect::JavaScript),
            "typescript" | "ts" => Ok(SourceDialect::TypeScript),
            "tsx" => Ok(SourceDialect::Tsx),
            _ => Err(format!("Unknown source dialect: {s}")),
        }
    }
}

impl SourceDialect {
    /// Extensions of files the linter picks up when walking directories
    pub const EXTENSIONS: &'static [&'static str] = &["js", "jsx", "mjs", "cjs", "ts", "mts", "cts", "tsx"];

    /// Detect dialect from file extension, `None` for files we do not lint
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Detect dialect from file path, falling back to JavaScript
    pub fn from_path(path: &std::path::Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }

    pub fn is_typescript(self) -> bool {
        matches!(self, Self::TypeScript | Self::Tsx)
    }

    pub fn supports_jsx(self) -> bool {
        matches!(self, Self::JavaScript | Self::Tsx)
    }
}

/// Normalizes configuration keys (rule names, option names) to lowercase kebab-case.
pub fn normalize_key(key: &str) -> String {
    key.replace('_', "-").to_ascii_lowercase()
}
