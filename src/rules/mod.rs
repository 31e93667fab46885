pub mod sort_styles;

pub use sort_styles::{SortOrder, SortStyles, SortStylesConfig};

use crate::config::GlobalConfig;
use crate::rule::Rule;
use std::collections::HashSet;

/// Type alias for rule constructor functions
type RuleCtor = fn(&crate::config::Config) -> Box<dyn Rule>;

/// Entry in the rule registry
struct RuleEntry {
    name: &'static str,
    ctor: RuleCtor,
}

/// Every rule, in reporting order
const RULES: &[RuleEntry] = &[RuleEntry {
    name: "sort-styles",
    ctor: SortStyles::from_config,
}];

/// Returns all rule instances for config validation and CLI
pub fn all_rules(config: &crate::config::Config) -> Vec<Box<dyn Rule>> {
    RULES.iter().map(|entry| (entry.ctor)(config)).collect()
}

/// Creates a single rule by name with the given config
///
/// Returns None if the rule name is not found.
pub fn create_rule_by_name(name: &str, config: &crate::config::Config) -> Option<Box<dyn Rule>> {
    let name = crate::config::normalize_key(name);
    RULES
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| (entry.ctor)(config))
}

/// Check whether a rule list contains the "all" keyword (case-insensitive).
fn contains_all_keyword(list: &[String]) -> bool {
    list.iter().any(|s| s.eq_ignore_ascii_case("all"))
}

/// Filter rules based on the `enable`/`disable` lists of the global config
pub fn filter_rules(rules: &[Box<dyn Rule>], global_config: &GlobalConfig) -> Vec<Box<dyn Rule>> {
    let normalize = |names: &[String]| -> HashSet<String> {
        names.iter().map(|n| crate::config::resolve_rule_name(n)).collect()
    };
    let disabled_rules = normalize(&global_config.disable);
    let enabled_rules = normalize(&global_config.enable);
    let enable_all = global_config.enable.is_empty() || contains_all_keyword(&global_config.enable);

    // disable = ["all"] turns everything off unless rules are enabled explicitly
    if contains_all_keyword(&global_config.disable) {
        if global_config.enable.is_empty() {
            return Vec::new();
        }
        return rules
            .iter()
            .filter(|rule| enable_all || enabled_rules.contains(rule.name()))
            .map(|rule| dyn_clone::clone_box(&**rule))
            .collect();
    }

    rules
        .iter()
        .filter(|rule| enable_all || enabled_rules.contains(rule.name()))
        .filter(|rule| !disabled_rules.contains(rule.name()))
        .map(|rule| dyn_clone::clone_box(&**rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn names(rules: &[Box<dyn Rule>]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    fn global(enable: &[&str], disable: &[&str]) -> GlobalConfig {
        GlobalConfig {
            enable: enable.iter().map(|s| s.to_string()).collect(),
            disable: disable.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_rules_are_registered() {
        let rules = all_rules(&Config::default());
        assert_eq!(names(&rules), vec!["sort-styles"]);
    }

    #[test]
    fn test_create_rule_by_name() {
        let config = Config::default();
        assert!(create_rule_by_name("sort-styles", &config).is_some());
        assert!(create_rule_by_name("Sort_Styles", &config).is_some());
        assert!(create_rule_by_name("no-such-rule", &config).is_none());
    }

    #[test]
    fn test_filter_rules() {
        let rules = all_rules(&Config::default());

        assert_eq!(names(&filter_rules(&rules, &global(&[], &[]))), vec!["sort-styles"]);
        assert!(filter_rules(&rules, &global(&[], &["sort-styles"])).is_empty());
        assert!(filter_rules(&rules, &global(&[], &["sort_styles"])).is_empty());
        assert_eq!(names(&filter_rules(&rules, &global(&["sort-styles"], &[]))), vec!["sort-styles"]);
        assert!(filter_rules(&rules, &global(&["other"], &[])).is_empty());
        assert_eq!(names(&filter_rules(&rules, &global(&["ALL"], &[]))), vec!["sort-styles"]);
    }

    #[test]
    fn test_disable_all() {
        let rules = all_rules(&Config::default());
        assert!(filter_rules(&rules, &global(&[], &["all"])).is_empty());
        assert_eq!(
            names(&filter_rules(&rules, &global(&["sort-styles"], &["all"]))),
            vec!["sort-styles"]
        );
    }
}
