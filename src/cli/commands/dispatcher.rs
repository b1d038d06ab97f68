//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, validate, PausepointConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Configuration is loaded and validated for every command except
    /// `completions`, which must work in any directory.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let cmd: Box<dyn Command> = match &cli.command {
            Commands::Completions(args) => {
                Box::new(super::completions::CompletionsCommand::new(args.clone()))
            }
            Commands::Export(args) => Box::new(super::export::ExportCommand::new(
                &self.project_root,
                self.load_config(cli)?,
                args.clone(),
            )),
            Commands::Store(args) => Box::new(super::store::StoreCommand::new(
                &self.project_root,
                self.load_config(cli)?,
                args.clone(),
            )),
        };
        cmd.execute(ui)
    }

    fn load_config(&self, cli: &Cli) -> Result<PausepointConfig> {
        let config = load_config(&self.project_root, cli.config.as_deref())?;
        validate(&config)?;
        debug!("loaded config: {:?}", config);
        Ok(config)
    }
}
