//! Store command implementation.
//!
//! Provides `pausepoint store exists|read|write`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::{StoreArgs, StoreSubcommand};
use crate::config::PausepointConfig;
use crate::error::{PausepointError, Result};
use crate::store::CollectionStore;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The store command implementation.
pub struct StoreCommand {
    project_root: PathBuf,
    config: PausepointConfig,
    args: StoreArgs,
}

impl StoreCommand {
    /// Create a new store command.
    pub fn new(project_root: &Path, config: PausepointConfig, args: StoreArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn open(&self, namespace: &str, name: &str) -> Result<CollectionStore> {
        let layout = self.config.storage.layout(&self.project_root);
        Ok(CollectionStore::open(&layout, namespace, name)?
            .with_write_mode(self.config.storage.write_mode()))
    }
}

impl Command for StoreCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.command {
            StoreSubcommand::Exists { namespace, name } => {
                let store = self.open(namespace, name)?;
                if store.exists() {
                    ui.message(&store.path().display().to_string());
                    Ok(CommandResult::success())
                } else {
                    ui.warning(&format!("No document at {}", store.path().display()));
                    Ok(CommandResult::failure(1))
                }
            }
            StoreSubcommand::Read { namespace, name } => {
                let store = self.open(namespace, name)?;
                let value = store.read_value()?;
                let pretty = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
                ui.message(&pretty);
                Ok(CommandResult::success())
            }
            StoreSubcommand::Write {
                namespace,
                name,
                value,
                file,
            } => {
                let store = self.open(namespace, name)?;
                let value = parse_input(value.as_deref(), file.as_deref())?;
                store.write(&value)?;
                ui.success(&format!("Wrote {}", store.path().display()));
                Ok(CommandResult::success())
            }
        }
    }
}

/// Parse the JSON given inline or in a file. Nothing is written on failure.
fn parse_input(value: Option<&str>, file: Option<&Path>) -> Result<serde_json::Value> {
    let (text, source) = match (value, file) {
        (Some(text), _) => (text.to_string(), PathBuf::from("<--value>")),
        (None, Some(path)) => (fs::read_to_string(path)?, path.to_path_buf()),
        (None, None) => {
            return Err(PausepointError::ConfigValidationError {
                message: "store write needs --value or --file".to_string(),
            })
        }
    };

    serde_json::from_str(&text).map_err(|e| PausepointError::InvalidFormat {
        path: source,
        message: e.to_string(),
    })
}
