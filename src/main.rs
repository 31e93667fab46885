// Use jemalloc for better memory allocation performance on Unix-like systems
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

// Use mimalloc on Windows for better performance
#[cfg(target_env = "msvc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli_types;
pub use cli_types::{CheckArgs, FailOn, FixMode};

mod cli_utils;

mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use rnlint_lib::exit_codes::exit;

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control colored output
    #[arg(long, global = true, default_value_t, value_enum)]
    color: Color,

    /// Path to configuration file
    #[arg(
        long,
        global = true,
        help = "Path to configuration file",
        conflicts_with_all = ["no_config", "isolated"]
    )]
    config: Option<String>,

    /// Ignore all configuration files and use built-in defaults
    #[arg(
        long,
        global = true,
        help = "Ignore all configuration files and use built-in defaults"
    )]
    no_config: bool,

    /// Ignore all configuration files (alias for --no-config)
    #[arg(
        long,
        global = true,
        help = "Ignore all configuration files (alias for --no-config)",
        conflicts_with = "no_config"
    )]
    isolated: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint JavaScript and TypeScript files and print warnings/errors
    Check(CheckArgs),
    /// Sort style sheets in place (alias for check --fix that exits 0)
    Fmt(CheckArgs),
    /// Initialize a new configuration file
    Init {
        /// Output file path (default: .rnlint.toml)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },
    /// Show information about a rule or list all rules
    Rule {
        /// Rule name (optional, omit to list all rules)
        rule: Option<String>,
        /// Output format
        #[arg(long, short = 'o', value_name = "FORMAT", default_value_t, value_enum)]
        output_format: commands::rule::OutputFormat,
    },
    /// Show version information
    Version,
}

#[derive(Clone, Default, ValueEnum)]
enum Color {
    #[default]
    Auto,
    Always,
    Never,
}

fn main() -> anyhow::Result<()> {
    // Reset SIGPIPE to default behavior on Unix so piping to `head` etc. works correctly.
    #[cfg(unix)]
    {
        // SAFETY: restoring the default SIGPIPE disposition before any output is written
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    // Initialize logging from RUST_LOG, e.g. RUST_LOG=debug rnlint check .
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    match cli.color {
        Color::Always => colored::control::set_override(true),
        Color::Never => colored::control::set_override(false),
        Color::Auto => colored::control::unset_override(),
    }

    let isolated = cli.no_config || cli.isolated;
    let config_path = if isolated { None } else { cli.config.as_deref() };

    let result = std::panic::catch_unwind(|| match cli.command {
        Commands::Check(mut args) => {
            args.fix_mode = if args.fix { FixMode::CheckFix } else { FixMode::Check };
            commands::check::run_check(&args, config_path, isolated);
        }
        Commands::Fmt(mut args) => {
            args.fix = true;
            args.fix_mode = FixMode::Format;
            commands::check::run_check(&args, config_path, isolated);
        }
        Commands::Init { output } => {
            commands::init::handle_init(output);
        }
        Commands::Rule { rule, output_format } => {
            commands::rule::handle_rule(rule, output_format, config_path, isolated);
        }
        Commands::Version => {
            println!("rnlint {}", env!("CARGO_PKG_VERSION"));
        }
    });

    if let Err(e) = result {
        eprintln!("[rnlint panic handler] Uncaught panic: {e:?}");
        exit::tool_error();
    }
    Ok(())
}
