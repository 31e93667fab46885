/// Serde-based configuration system for rules
///
/// Each rule owns a plain config struct; the TOML section for the rule is
/// deserialized straight into it, so serde attributes (defaults, aliases)
/// define the accepted keys.
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for rule configurations
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name (e.g., "sort-styles")
    const RULE_NAME: &'static str;
}

/// Helper to load rule configuration from the global config
///
/// Invalid configuration is logged and replaced by the rule's defaults.
pub fn load_rule_config<T: RuleConfig>(config: &crate::config::Config) -> T {
    config
        .rules
        .get(T::RULE_NAME)
        .and_then(|rule_config| {
            let table: toml::map::Map<String, toml::Value> = rule_config
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();

            match toml::Value::Table(table).try_into::<T>() {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Invalid configuration for rule {}: {}", T::RULE_NAME, e);
                    log::warn!("Using default values for rule {}.", T::RULE_NAME);
                    None
                }
            }
        })
        .unwrap_or_default()
}

/// Build a TOML schema table from a rule config struct's defaults.
///
/// Keys whose default has no TOML form (`None` fields) are left out.
pub fn config_schema_table<T: RuleConfig>(config: &T) -> Option<toml::map::Map<String, toml::Value>> {
    match json_to_toml_value(&serde_json::to_value(config).ok()?)? {
        toml::Value::Table(table) => Some(table),
        _ => None,
    }
}

/// Convert JSON value to TOML value for default config generation
pub fn json_to_toml_value(json_val: &serde_json::Value) -> Option<toml::Value> {
    match json_val {
        serde_json::Value::Null => None,
        serde_json::Value::Bool(b) => Some(toml::Value::Boolean(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(toml::Value::Integer(i))
            } else {
                n.as_f64().map(toml::Value::Float)
            }
        }
        serde_json::Value::String(s) => Some(toml::Value::String(s.clone())),
        serde_json::Value::Array(arr) => {
            let toml_arr: Vec<_> = arr.iter().filter_map(json_to_toml_value).collect();
            Some(toml::Value::Array(toml_arr))
        }
        serde_json::Value::Object(obj) => {
            let mut toml_table = toml::map::Map::new();
            for (k, v) in obj {
                if let Some(toml_v) = json_to_toml_value(v) {
                    toml_table.insert(k.clone(), toml_v);
                }
            }
            Some(toml::Value::Table(toml_table))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
    #[serde(default)]
    struct TestRuleConfig {
        #[serde(default)]
        enabled: bool,
        #[serde(default, alias = "max-depth")]
        max_depth: i64,
        #[serde(default)]
        names: Vec<String>,
        #[serde(default)]
        pattern: Option<String>,
    }

    impl RuleConfig for TestRuleConfig {
        const RULE_NAME: &'static str = "test-rule";
    }

    fn config_with_section(section: &str) -> crate::config::Config {
        crate::config::Config::from_toml_str(section).unwrap()
    }

    #[test]
    fn test_load_rule_config_defaults_when_missing() {
        let config = crate::config::Config::default();
        let rule_config: TestRuleConfig = load_rule_config(&config);
        assert_eq!(rule_config, TestRuleConfig::default());
    }

    #[test]
    fn test_load_rule_config_with_alias() {
        let config = config_with_section("[test-rule]\nenabled = true\nmax-depth = 3\nnames = [\"a\"]\n");
        let rule_config: TestRuleConfig = load_rule_config(&config);
        assert!(rule_config.enabled);
        assert_eq!(rule_config.max_depth, 3);
        assert_eq!(rule_config.names, vec!["a".to_string()]);
    }

    #[test]
    fn test_load_rule_config_invalid_falls_back_to_default() {
        let config = config_with_section("[test-rule]\nenabled = \"sometimes\"\n");
        let rule_config: TestRuleConfig = load_rule_config(&config);
        assert_eq!(rule_config, TestRuleConfig::default());
    }

    #[test]
    fn test_config_schema_table_uses_defaults() {
        let table = config_schema_table(&TestRuleConfig::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("enabled"), Some(&toml::Value::Boolean(false)));
        assert_eq!(table.get("max_depth"), Some(&toml::Value::Integer(0)));
        assert_eq!(table.get("names"), Some(&toml::Value::Array(Vec::new())));
        assert!(!table.contains_key("pattern"));
    }

    #[test]
    fn test_json_to_toml_value() {
        assert!(json_to_toml_value(&serde_json::Value::Null).is_none());
        assert_eq!(
            json_to_toml_value(&serde_json::json!(1.5)),
            Some(toml::Value::Float(1.5))
        );

        let converted = json_to_toml_value(&serde_json::json!({"a": [1, null, "x"], "b": null})).unwrap();
        let table = converted.as_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("a"),
            Some(&toml::Value::Array(vec![
                toml::Value::Integer(1),
                toml::Value::String("x".to_string())
            ]))
        );
    }
}
