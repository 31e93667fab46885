//! Handler for the `init` command.

use colored::*;

use rnlint_lib::config as rnlint_config;
use rnlint_lib::exit_codes::exit;

/// Handle the init command: create a new configuration file.
pub fn handle_init(output: Option<String>) {
    let output_path = output.as_deref().unwrap_or(".rnlint.toml");

    match rnlint_config::create_default_config(output_path) {
        Ok(()) => {
            println!("Created default configuration file: {output_path}");
            println!("\nYou can now:");
            println!("  - Run {} to lint your style sheets", "rnlint check .".cyan());
            println!("  - Run {} to sort them in place", "rnlint fmt .".cyan());
        }
        Err(e) => {
            eprintln!("{}: Failed to create config file: {}", "Error".red().bold(), e);
            exit::tool_error();
        }
    }
}
