//! mlbomdoc: documentation generator for Machine-Learning Bills of Materials
//!
//! Reads a `CycloneDX` MLBOM and renders its model cards as a console,
//! JSON, Markdown or PDF document.

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mlbom_doc::{
    cli::{self, GenerateConfig},
    pipeline::{exit_codes, write_output, OutputTarget},
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build long version string with format support info
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nSupported MLBOM Formats:",
        "\n  CycloneDX: 1.5, 1.6 (JSON)",
        "\n\nOutput Formats:",
        "\n  console, json, markdown, pdf"
    )
}

#[derive(Parser)]
#[command(name = "mlbomdoc")]
#[command(version, long_version = build_long_version())]
#[command(about = "Generate documentation for Machine-Learning Bills of Materials", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "EXIT CODES:
    0  Document generated
    1  Input missing, unreadable or invalid
    2  Invalid usage (missing input or output file)

EXAMPLES:
    # Summary on the terminal
    mlbomdoc -i model.cdx.json

    # Markdown documentation
    mlbomdoc -i model.cdx.json -f markdown -o model.md

    # Fail on datasets without type or classification
    mlbomdoc -i model.cdx.json -f pdf -o model.pdf --strict")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, visible_alias = "debug", global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    generate: GenerateArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Arguments for the default generate action
#[derive(Args)]
struct GenerateArgs {
    /// MLBOM file to document
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Output file (stdout if not specified; required for json, markdown and pdf)
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long)]
    no_color: bool,

    /// Reject datasets missing their type or classification
    #[arg(long)]
    strict: bool,

    /// Title shown under the summary heading and in the document metadata
    #[arg(long)]
    title: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .mlbomdoc.yaml in the current directory
    Init,
}

fn init_logging(verbose: bool, quiet: bool) {
    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        None => {
            let args = cli.generate;
            let config = GenerateConfig {
                input: args.input,
                format: args.format,
                output_file: args.output_file,
                no_color: args.no_color,
                strict: args.strict,
                title: args.title,
                config_file: cli.config,
                quiet: cli.quiet,
            };
            let exit_code = cli::run_generate(config)?;
            if exit_code != exit_codes::SUCCESS {
                std::process::exit(exit_code);
            }
            Ok(())
        }

        Some(Commands::Completions { shell }) => {
            generate(shell, &mut Cli::command(), "mlbomdoc", &mut io::stdout());
            Ok(())
        }

        Some(Commands::ConfigSchema { output }) => {
            let schema = mlbom_doc::config::generate_json_schema()
                .context("failed to serialize config schema")?;
            let target = OutputTarget::from_option(output);
            write_output(&schema, &target, cli.quiet)
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                let yaml = cli::show_config(cli.config.as_deref())?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                cli::print_config_paths(cli.config.as_deref());
                Ok(())
            }
            ConfigAction::Init => {
                let dir = std::env::current_dir().context("cannot determine current directory")?;
                let target = cli::init_config(&dir)?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}
