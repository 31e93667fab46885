use super::registry::{RuleRegistry, is_valid_rule_name};
use super::types::Config;

/// Keys accepted in the `[global]` section, in every spelling serde accepts
const KNOWN_GLOBAL_KEYS: &[&str] = &[
    "enable",
    "disable",
    "exclude",
    "include",
    "respect-gitignore",
    "respect_gitignore",
    "style-sheet-object-names",
    "style_sheet_object_names",
    "react-native/style-sheet-object-names",
    "dialect",
    "fixable",
    "unfixable",
];

/// Represents a config validation warning
#[derive(Debug, Clone)]
pub struct ConfigValidationWarning {
    pub message: String,
    pub rule: Option<String>,
    pub key: Option<String>,
}

pub(super) fn is_known_global_key(key: &str) -> bool {
    KNOWN_GLOBAL_KEYS.contains(&key)
}

/// Validate a loaded config against the rule registry.
///
/// Unknown rules, unknown options and type mismatches are reported as
/// warnings; none of them prevent linting.
pub fn validate_config(config: &Config, registry: &RuleRegistry) -> Vec<ConfigValidationWarning> {
    let mut warnings = Vec::new();
    let known_rules: Vec<String> = registry.rule_names().into_iter().collect();

    // 1. Unknown rules
    for rule in config.rules.keys() {
        if !known_rules.contains(rule) {
            let message = if let Some(suggestion) = suggest_similar_key(rule, &known_rules) {
                format!("Unknown rule in config: {rule} (did you mean: {suggestion}?)")
            } else {
                format!("Unknown rule in config: {rule}")
            };
            warnings.push(ConfigValidationWarning {
                message,
                rule: Some(rule.clone()),
                key: None,
            });
        }
    }

    // 2. Unknown options and type mismatches
    for (rule, rule_cfg) in &config.rules {
        let Some(valid_keys) = registry.config_keys_for(rule) else {
            continue;
        };
        for (key, actual) in &rule_cfg.values {
            if !valid_keys.contains(key) {
                let valid_keys_vec: Vec<String> = valid_keys.iter().cloned().collect();
                let message = if let Some(suggestion) = suggest_similar_key(key, &valid_keys_vec) {
                    format!("Unknown option for rule {rule}: {key} (did you mean: {suggestion}?)")
                } else {
                    format!("Unknown option for rule {rule}: {key}")
                };
                warnings.push(ConfigValidationWarning {
                    message,
                    rule: Some(rule.clone()),
                    key: Some(key.clone()),
                });
            } else if let Some(expected) = registry.expected_value_for(rule, key)
                && !toml_value_type_matches(expected, actual)
            {
                warnings.push(ConfigValidationWarning {
                    message: format!(
                        "Type mismatch for {}.{}: expected {}, got {}",
                        rule,
                        key,
                        toml_type_name(expected),
                        toml_type_name(actual)
                    ),
                    rule: Some(rule.clone()),
                    key: Some(key.clone()),
                });
            }
        }
    }

    // 3. Unknown global options
    let known_global: Vec<String> = KNOWN_GLOBAL_KEYS.iter().map(|k| k.to_string()).collect();
    for key in &config.unknown_global_keys {
        let message = if let Some(suggestion) = suggest_similar_key(key, &known_global) {
            format!("Unknown global option: {key} (did you mean: {suggestion}?)")
        } else {
            format!("Unknown global option: {key}")
        };
        warnings.push(ConfigValidationWarning {
            message,
            rule: None,
            key: Some(key.clone()),
        });
    }

    // 4. Unknown rules referenced by enable/disable lists
    for (list_name, list) in [("enable", &config.global.enable), ("disable", &config.global.disable)] {
        for rule_name in list {
            if !is_valid_rule_name(rule_name) {
                warnings.push(unknown_rule_warning(rule_name, &format!("global.{list_name}"), &known_rules));
            }
        }
    }

    warnings
}

/// Validates rule names from CLI flags against the known rule set.
pub fn validate_cli_rule_names(enable: Option<&str>, disable: Option<&str>) -> Vec<ConfigValidationWarning> {
    let known_rules: Vec<String> = super::registry::default_registry().rule_names().into_iter().collect();
    let mut warnings = Vec::new();

    for (flag_name, input) in [("--enable", enable), ("--disable", disable)] {
        let Some(input) = input else {
            continue;
        };
        for name in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !is_valid_rule_name(name) {
                warnings.push(unknown_rule_warning(name, flag_name, &known_rules));
            }
        }
    }

    warnings
}

fn unknown_rule_warning(name: &str, location: &str, known_rules: &[String]) -> ConfigValidationWarning {
    let message = if let Some(suggestion) = suggest_similar_key(name, known_rules) {
        format!("Unknown rule in {location}: {name} (did you mean: {suggestion}?)")
    } else {
        format!("Unknown rule in {location}: {name}")
    };
    ConfigValidationWarning {
        message,
        rule: Some(name.to_string()),
        key: None,
    }
}

fn toml_type_name(val: &toml::Value) -> &'static str {
    match val {
        toml::Value::String(_) => "string",
        toml::Value::Integer(_) => "integer",
        toml::Value::Float(_) => "float",
        toml::Value::Boolean(_) => "boolean",
        toml::Value::Array(_) => "array",
        toml::Value::Table(_) => "table",
        toml::Value::Datetime(_) => "datetime",
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] { 0 } else { 1 };
            curr_row[j] = (prev_row[j] + 1)          // deletion
                .min(curr_row[j - 1] + 1)            // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Suggest the closest valid key for a misspelled one
pub fn suggest_similar_key(unknown: &str, valid_keys: &[String]) -> Option<String> {
    let unknown_lower = unknown.to_lowercase();
    let max_distance = 2.max(unknown.len() / 3); // Allow up to 2 edits or 30% of string length

    let mut best_match: Option<(String, usize)> = None;

    for valid in valid_keys {
        let distance = levenshtein_distance(&unknown_lower, &valid.to_lowercase());
        if distance <= max_distance && best_match.as_ref().is_none_or(|(_, best)| distance < *best) {
            best_match = Some((valid.clone(), distance));
        }
    }

    best_match.map(|(key, _)| key)
}

fn toml_value_type_matches(expected: &toml::Value, actual: &toml::Value) -> bool {
    use toml::Value::*;
    match (expected, actual) {
        (String(_), String(_)) => true,
        (Integer(_), Integer(_)) => true,
        (Float(_), Float(_)) => true,
        (Boolean(_), Boolean(_)) => true,
        (Array(_), Array(_)) => true,
        (Table(_), Table(_)) => true,
        (Datetime(_), Datetime(_)) => true,
        // Allow integer for float
        (Float(_), Integer(_)) => true,
        _ => false,
    }
}
