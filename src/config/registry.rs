use std::sync::LazyLock;

use crate::rule::Rule;

use super::dialect::normalize_key;

/// Lazily-initialized default `RuleRegistry` built from rules with default config.
///
/// Rule config schemas (valid keys, types, aliases) are intrinsic to each rule type
/// and do not change based on runtime configuration.
static DEFAULT_REGISTRY: LazyLock<RuleRegistry> = LazyLock::new(|| {
    let default_config = super::types::Config::default();
    let rules = crate::rules::all_rules(&default_config);
    RuleRegistry::from_rules(&rules)
});

/// Returns a reference to the lazily-initialized default `RuleRegistry`.
pub fn default_registry() -> &'static RuleRegistry {
    &DEFAULT_REGISTRY
}

/// Registry of all known rules and their config schemas
pub struct RuleRegistry {
    /// Map of rule name (e.g. "sort-styles") to its config keys and default TOML values
    pub rule_schemas: std::collections::BTreeMap<String, toml::map::Map<String, toml::Value>>,
    /// Map of rule name to config key aliases
    pub rule_aliases: std::collections::BTreeMap<String, std::collections::HashMap<String, String>>,
}

impl RuleRegistry {
    /// Build a registry from a list of rules
    pub fn from_rules(rules: &[Box<dyn Rule>]) -> Self {
        let mut rule_schemas = std::collections::BTreeMap::new();
        let mut rule_aliases = std::collections::BTreeMap::new();

        for rule in rules {
            let norm_name = if let Some((name, toml::Value::Table(table))) = rule.default_config_section() {
                let norm_name = normalize_key(&name);
                rule_schemas.insert(norm_name.clone(), table);
                norm_name
            } else {
                let norm_name = normalize_key(rule.name());
                rule_schemas.insert(norm_name.clone(), toml::map::Map::new());
                norm_name
            };

            if let Some(aliases) = rule.config_aliases() {
                rule_aliases.insert(norm_name, aliases);
            }
        }

        RuleRegistry {
            rule_schemas,
            rule_aliases,
        }
    }

    /// Get all known rule names
    pub fn rule_names(&self) -> std::collections::BTreeSet<String> {
        self.rule_schemas.keys().cloned().collect()
    }

    /// Get the valid configuration keys for a rule, including both original and normalized variants
    pub fn config_keys_for(&self, rule: &str) -> Option<std::collections::BTreeSet<String>> {
        self.rule_schemas.get(rule).map(|schema| {
            let mut all_keys = std::collections::BTreeSet::new();

            // Always allow 'severity' for any rule
            all_keys.insert("severity".to_string());

            for key in schema.keys() {
                all_keys.insert(key.clone());
                all_keys.insert(key.replace('_', "-"));
                all_keys.insert(key.replace('-', "_"));
            }

            if let Some(aliases) = self.rule_aliases.get(rule) {
                for alias_key in aliases.keys() {
                    all_keys.insert(alias_key.clone());
                }
            }

            all_keys
        })
    }

    /// Get the expected value type for a rule's configuration key, trying variants.
    pub fn expected_value_for(&self, rule: &str, key: &str) -> Option<&toml::Value> {
        let schema = self.rule_schemas.get(rule)?;

        if let Some(aliases) = self.rule_aliases.get(rule)
            && let Some(canonical_key) = aliases.get(key)
            && let Some(value) = schema.get(canonical_key)
        {
            return Some(value);
        }

        [key.to_string(), key.replace('-', "_"), key.replace('_', "-")]
            .iter()
            .find_map(|variant| schema.get(variant))
    }

    /// Resolve a user-supplied rule name to its canonical form, if known
    pub fn resolve_rule_name(&self, name: &str) -> Option<String> {
        let normalized = normalize_key(name);
        self.rule_schemas.contains_key(&normalized).then_some(normalized)
    }
}

/// Resolve a rule name from config or CLI input to its canonical form.
/// Unknown names are returned normalized so they still compare consistently.
pub fn resolve_rule_name(name: &str) -> String {
    default_registry()
        .resolve_rule_name(name)
        .unwrap_or_else(|| normalize_key(name))
}

/// Whether a name refers to a known rule
pub fn is_valid_rule_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("all") || default_registry().resolve_rule_name(name).is_some()
}
