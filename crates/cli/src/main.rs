mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sdkscope_ir::GeneratorName;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use commands::filter::cmd_filter;
use commands::generators::cmd_generators;
use commands::prune::cmd_prune;
use commands::FilterOptions;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "SDKSCOPE_LOG";

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Audience-scoped SDK surface filtering.
#[derive(Parser)]
#[command(
    name = "sdkscope",
    version,
    about = "Compute which IR declarations an SDK must contain for a set of audiences"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Emit debug logs to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the declarations retained for the requested audiences
    Filter {
        /// Path to the IR JSON file
        ir: PathBuf,
        /// Audience to generate for (repeatable; none means all)
        #[arg(long = "audience", short = 'a')]
        audiences: Vec<String>,
        /// Config file (defaults to ./sdkscope.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Generator the run is for
        #[arg(long)]
        generator: Option<GeneratorName>,
    },

    /// Write the IR restricted to the retained declarations
    Prune {
        /// Path to the IR JSON file
        ir: PathBuf,
        /// Audience to generate for (repeatable; none means all)
        #[arg(long = "audience", short = 'a')]
        audiences: Vec<String>,
        /// Config file (defaults to ./sdkscope.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file (stdout when absent)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the known generator names
    Generators,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Filter {
            ir,
            audiences,
            config,
            generator,
        } => {
            cmd_filter(&FilterOptions {
                ir: &ir,
                audiences: &audiences,
                generator,
                config: config.as_deref(),
                output: cli.output,
                quiet: cli.quiet,
            });
        }
        Commands::Prune {
            ir,
            audiences,
            config,
            out,
        } => {
            cmd_prune(
                &FilterOptions {
                    ir: &ir,
                    audiences: &audiences,
                    generator: None,
                    config: config.as_deref(),
                    output: cli.output,
                    quiet: cli.quiet,
                },
                out.as_deref(),
            );
        }
        Commands::Generators => {
            cmd_generators(cli.output, cli.quiet);
        }
    }
}

/// Print an error to stderr in the selected output format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}
