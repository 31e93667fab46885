use clap::{Args, ValueEnum};

/// Fix mode determines exit code behavior: Check/CheckFix exit 1 on violations, Format exits 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FixMode {
    #[default]
    Check,
    CheckFix,
    Format,
}

/// Fail-on mode determines which severity triggers exit code 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailOn {
    /// Exit 1 on any violation (info, warning, or error)
    #[default]
    Any,
    /// Exit 1 on warning or error severity violations
    Warning,
    /// Exit 1 only on error-severity violations
    Error,
    /// Always exit 0
    Never,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to lint (defaults to the current directory)
    #[arg(required = false)]
    pub paths: Vec<String>,

    /// Fix issues automatically where possible
    #[arg(short, long, default_value = "false")]
    pub fix: bool,

    /// Disable specific rules (comma-separated)
    #[arg(short, long)]
    pub disable: Option<String>,

    /// Enable only specific rules (comma-separated)
    #[arg(short, long, visible_alias = "rules")]
    pub enable: Option<String>,

    /// Only allow these rules to be fixed (comma-separated)
    #[arg(long)]
    pub fixable: Option<String>,

    /// Prevent these rules from being fixed (comma-separated). Takes precedence
    /// over --fixable.
    #[arg(long)]
    pub unfixable: Option<String>,

    /// Exclude specific files or directories (comma-separated glob patterns)
    #[arg(long)]
    pub exclude: Option<String>,

    /// Include only specific files or directories (comma-separated glob patterns)
    #[arg(long)]
    pub include: Option<String>,

    /// Respect .gitignore files when scanning directories
    /// When not specified, uses config file value (default: true)
    #[arg(
        long,
        num_args(0..=1),
        require_equals(true),
        default_missing_value = "true",
        help = "Respect .gitignore files when scanning directories (does not apply to explicitly provided paths)"
    )]
    pub respect_gitignore: Option<bool>,

    /// Objects whose calls declare style sheets (comma-separated, e.g. StyleSheet,Sheets)
    #[arg(long)]
    pub style_sheet_object_names: Option<String>,

    /// Force the source dialect instead of detecting it from file extensions
    #[arg(long, value_enum)]
    pub dialect: Option<Dialect>,

    /// Show detailed output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print diagnostics, but nothing else
    #[arg(short, long, help = "Print diagnostics, but nothing else")]
    pub quiet: bool,

    /// Output format: text (default) or json
    #[arg(long, short = 'o', default_value_t, value_enum)]
    pub output: Output,

    /// Read from stdin instead of files
    #[arg(long, help = "Read from stdin instead of files")]
    pub stdin: bool,

    /// Filename to use for stdin input (for dialect detection and messages)
    #[arg(long, help = "Filename to use when reading from stdin (e.g., styles.tsx)")]
    pub stdin_filename: Option<String>,

    /// Control when to exit with code 1: any (default), warning, error, or never
    #[arg(long, value_enum, default_value_t)]
    pub fail_on: FailOn,

    #[arg(skip)]
    pub fix_mode: FixMode,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum Output {
    #[default]
    Text,
    Json,
}

impl From<Output> for rnlint_lib::output::OutputFormat {
    fn from(output: Output) -> Self {
        match output {
            Output::Text => Self::Text,
            Output::Json => Self::Json,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lower")]
pub enum Dialect {
    #[value(aliases(["js", "jsx"]))]
    JavaScript,
    #[value(alias("ts"))]
    TypeScript,
    Tsx,
}

impl From<Dialect> for rnlint_lib::config::SourceDialect {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::JavaScript => Self::JavaScript,
            Dialect::TypeScript => Self::TypeScript,
            Dialect::Tsx => Self::Tsx,
        }
    }
}
