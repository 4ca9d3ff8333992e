use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use compcheck::validation::DocumentKind;

mod commands;

use commands::{OutputFormat, inspect_command, validate_command};

#[derive(Parser)]
#[command(
    name = "compcheck",
    about = "A CLI tool that validates component configuration files before build and deploy",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the component source directory
    #[arg(short, long, default_value = ".", global = true)]
    dir: PathBuf,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration document (default command)
    Validate {
        /// Validate a specific file instead of discovering one under .choreo/
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Document kind, when it cannot be inferred from the file name
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<DocumentKind>,

        /// Override the schema version declared in the document
        #[arg(short, long)]
        schema_version: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Inspect the parsed document model
    Inspect {
        /// Inspect a specific file instead of discovering one under .choreo/
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Document kind, when it cannot be inferred from the file name
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<DocumentKind>,
    },
}

fn parse_kind(s: &str) -> Result<DocumentKind, String> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Validate {
            file,
            kind,
            schema_version,
            format,
        }) => {
            validate_command(
                &cli.dir,
                file.as_deref(),
                kind,
                schema_version.as_deref(),
                format,
            )?;
        }
        Some(Commands::Inspect { file, kind }) => {
            inspect_command(&cli.dir, file.as_deref(), kind)?;
        }
        None => {
            // Default to validate command
            validate_command(&cli.dir, None, None, None, OutputFormat::Text)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("compcheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("compcheck=info"), // -v: info messages
        _ => EnvFilter::new("compcheck=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
