//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{ArgGroup, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Pausepoint - export recorded coding sessions and manage their saved state.
#[derive(Debug, Parser)]
#[command(name = "pausepoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root holding the collection store (defaults to current directory)
    #[arg(short, long, global = true, env = "PAUSEPOINT_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file (overrides .pausepoint/config.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export a session snapshot as a zip archive
    Export(ExportArgs),

    /// Inspect or write collection documents
    Store(StoreArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command.
#[derive(Debug, Clone, clap::Args)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "namespace"])))]
pub struct ExportArgs {
    /// Session snapshot JSON file to export
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Read the snapshot from this store namespace
    #[arg(long, requires = "document")]
    pub namespace: Option<String>,

    /// Document name within --namespace
    #[arg(long, requires = "namespace")]
    pub document: Option<String>,

    /// Archive file to write (defaults to export.archive_name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Compression level 0-9 (overrides export.compression_level)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=9))]
    pub level: Option<u8>,
}

/// Arguments for the `store` command.
#[derive(Debug, Clone, clap::Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    pub command: StoreSubcommand,
}

/// Store subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum StoreSubcommand {
    /// Exit 0 if the document exists, 1 otherwise
    Exists {
        namespace: String,
        name: String,
    },
    /// Print the document as pretty JSON
    Read {
        namespace: String,
        name: String,
    },
    /// Replace the document with a JSON value
    Write {
        namespace: String,
        name: String,
        /// JSON value to write
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        value: Option<String>,
        /// Read the JSON value from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
