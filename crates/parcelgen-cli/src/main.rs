//! parcelgen CLI - Parcelable and JSON Java class generator
//!
//! Commands:
//! - `parcelgen generate` - Generate Java classes from a schema file or directory
//! - `parcelgen check` - Validate schemas without writing anything

use clap::{ArgAction, Parser, Subcommand};
use parcelgen_cli::logging::{LogConfig, init_logging};
use parcelgen_cli::{check, generate};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parcelgen")]
#[command(author, version, about = "Generates Parcelable Java classes with JSON support", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java source from a schema file or a directory of schemas
    ///
    /// Writes to stdout unless a destination is given. A destination directory
    /// is the root of your Java sources; files are placed by package.
    Generate {
        /// Schema file (.json, .yaml) or directory of schema files
        source: PathBuf,

        /// Output file or source root directory
        destination: Option<PathBuf>,

        /// Generator config (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Validate schema files
    Check {
        /// Schema file or directory of schema files
        source: PathBuf,

        /// Generator config (YAML or TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_verbosity(cli.verbose, cli.quiet)
        .with_ansi(std::io::stderr().is_terminal());
    init_logging(&log_config)?;

    match cli.command {
        Commands::Generate {
            source,
            destination,
            config,
        } => {
            generate::run(&source, destination, config.as_deref())?;
        }
        Commands::Check { source, config } => {
            check::run(&source, config.as_deref())?;
        }
    }

    Ok(())
}
