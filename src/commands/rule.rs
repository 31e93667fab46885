//! Handler for the `rule` command.

use clap::ValueEnum;
use colored::*;

use rnlint_lib::config as rnlint_config;
use rnlint_lib::exit_codes::exit;
use rnlint_lib::rule::{FixCapability, Rule};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// JSON array with one object per rule
    Json,
}

fn fix_label(rule: &dyn Rule) -> &'static str {
    match rule.fix_capability() {
        FixCapability::FullyFixable => "fixable",
        FixCapability::ConditionallyFixable => "conditionally fixable",
        FixCapability::Unfixable => "not fixable",
    }
}

fn rule_json(rule: &dyn Rule) -> serde_json::Value {
    let options = rule
        .default_config_section()
        .and_then(|(_, value)| serde_json::to_value(value).ok())
        .unwrap_or(serde_json::Value::Null);
    serde_json::json!({
        "name": rule.name(),
        "description": rule.description(),
        "fixable": !matches!(rule.fix_capability(), FixCapability::Unfixable),
        "options": options,
    })
}

fn print_rule_text(rule: &dyn Rule) {
    println!("{} - {}", rule.name().green().bold(), rule.description());
    println!("  {}", fix_label(rule).dimmed());
    if let Some((name, toml::Value::Table(table))) = rule.default_config_section() {
        println!("\n  Default configuration:");
        println!("    [{name}]");
        for (key, value) in &table {
            println!("    {key} = {value}");
        }
    }
}

/// Handle the rule command: describe one rule, or list them all.
pub fn handle_rule(rule: Option<String>, output_format: OutputFormat, config_path: Option<&str>, isolated: bool) {
    let config = crate::cli_utils::load_config_with_cli_error_handling_with_dir(config_path, isolated, None);
    let all_rules = rnlint_lib::rules::all_rules(&config);

    let selected: Vec<&dyn Rule> = match rule.as_deref() {
        Some(name) => {
            let canonical = rnlint_config::resolve_rule_name(name);
            let found: Vec<&dyn Rule> = all_rules
                .iter()
                .map(|r| r.as_ref())
                .filter(|r| r.name() == canonical)
                .collect();
            if found.is_empty() {
                eprintln!("{}: Unknown rule: {}", "Error".red().bold(), name);
                exit::tool_error();
            }
            found
        }
        None => all_rules.iter().map(|r| r.as_ref()).collect(),
    };

    match output_format {
        OutputFormat::Text => {
            if rule.is_none() {
                println!("Available rules:\n");
            }
            for (i, r) in selected.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_rule_text(*r);
            }
        }
        OutputFormat::Json => {
            let rules: Vec<serde_json::Value> = selected.iter().map(|r| rule_json(*r)).collect();
            match serde_json::to_string_pretty(&rules) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("{}: {}", "Error".red().bold(), e);
                    exit::tool_error();
                }
            }
        }
    }
}
