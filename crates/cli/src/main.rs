mod check;
mod config;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Exit status when the report fails.
pub(crate) const EXIT_FAIL: i32 = 1;
/// Exit status for unreadable or malformed snapshots and config files.
pub(crate) const EXIT_INPUT_ERROR: i32 = 2;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "COMPAT_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Check two API snapshots for backward compatibility.
#[derive(Parser)]
#[command(
    name = "compat-check",
    version,
    about = "Check two API snapshots for backward compatibility"
)]
struct Cli {
    /// Path to the older snapshot JSON
    before: PathBuf,

    /// Path to the newer snapshot JSON
    after: PathBuf,

    /// Member identities or entity names whose breaking changes are accepted
    /// (comma-separated, repeatable)
    #[arg(long, value_delimiter = ',')]
    allow: Vec<String>,

    /// Path to a TOML config file (default: ./compat.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long)]
    quiet: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    check::cmd_check(
        &cli.before,
        &cli.after,
        &cli.allow,
        cli.config.as_deref(),
        cli.output,
        cli.quiet,
    );
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

/// Report an error message to stderr in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
