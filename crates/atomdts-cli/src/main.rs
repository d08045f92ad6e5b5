//! atomdts CLI.
//!
//! Generates a TypeScript declaration file (`atom.d.ts`) for the Atom editor
//! API from its documentation metadata.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `generate` - Run load, patch, emit, and format, then print the result
//! - `patches` - List the built-in patch plan
//! - `completions` - Generate shell completions
//!
//! Logs go to stderr; stdout carries only command output, so
//! `atomdts generate > atom.d.ts` is safe.
//!
//! # Examples
//!
//! ```bash
//! # Generate from fixture/api.json with defaults
//! atomdts generate > atom.d.ts
//!
//! # Custom metadata and an extra patch file
//! atomdts generate --metadata api.json --patches fixes.json --output atom.d.ts
//! ```

use anyhow::Result;
use atomdts_cli::commands;
use atomdts_cli::commands::generate::GenerateOptions;
use atomdts_core::cli::{ExitCode, OutputFormat};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generates TypeScript declarations for the Atom editor API.
#[derive(Parser, Debug)]
#[command(name = "atomdts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "ATOMDTS_CONFIG")]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the declaration file.
    ///
    /// Loads the metadata document, applies the patch plan, emits one
    /// class declaration per documented class inside a single ambient
    /// module, and runs the configured formatter over the result.
    ///
    /// # Examples
    ///
    /// ```bash
    /// atomdts generate --output atom.d.ts
    /// atomdts generate --metadata api.json --no-builtin-patches --draft
    /// ```
    Generate {
        /// Metadata document (default: `metadata_path` from config)
        #[arg(short, long)]
        metadata: Option<PathBuf>,

        /// Extra patch file applied after the built-in passes
        ///
        /// Either a bare array of operations or
        /// `{"passes": [{"name": ..., "operations": [...]}]}`.
        #[arg(short, long)]
        patches: Option<PathBuf>,

        /// Skip the built-in patch passes
        #[arg(long)]
        no_builtin_patches: bool,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the unformatted draft
        #[arg(long)]
        draft: bool,
    },

    /// List the built-in patch plan.
    Patches {
        /// Output format (json, text)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Generate shell completions.
    ///
    /// Generates completion scripts for various shells that can be
    /// sourced or saved to enable tab completion for this CLI.
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = execute_command(cli).await?;

    std::process::exit(exit_code.as_i32());
}

/// Initializes logging.
///
/// `RUST_LOG` is honored unless `--verbose` forces debug level. Output goes
/// to stderr.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Routes the parsed command to its handler.
async fn execute_command(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Generate {
            metadata,
            patches,
            no_builtin_patches,
            output,
            draft,
        } => {
            let config = commands::common::load_config(cli.config.as_deref())?;
            let options = GenerateOptions {
                metadata,
                patches,
                no_builtin_patches,
                output,
                draft,
            };
            commands::generate::run(&config, &options).await
        }
        Commands::Patches { format } => {
            let format = format
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            commands::patches::run(format)
        }
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
