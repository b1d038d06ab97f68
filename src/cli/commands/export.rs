//! Export command implementation.
//!
//! Loads a session snapshot (from a JSON file or a collection document),
//! exports it, and writes the archive to disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::args::ExportArgs;
use crate::config::PausepointConfig;
use crate::error::{PausepointError, Result};
use crate::snapshot::{export_snapshot, ArchiveWriter};
use crate::store::CollectionStore;
use crate::tree::SessionSnapshot;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The export command implementation.
pub struct ExportCommand {
    project_root: PathBuf,
    config: PausepointConfig,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(project_root: &Path, config: PausepointConfig, args: ExportArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config,
            args,
        }
    }

    fn load_snapshot(&self) -> Result<SessionSnapshot> {
        if let Some(input) = &self.args.input {
            return read_snapshot_file(input);
        }

        match (&self.args.namespace, &self.args.document) {
            (Some(namespace), Some(document)) => {
                let layout = self.config.storage.layout(&self.project_root);
                CollectionStore::open(&layout, namespace, document)?.read()
            }
            _ => Err(PausepointError::ConfigValidationError {
                message: "export needs --input or --namespace with --document".to_string(),
            }),
        }
    }

    fn output_path(&self) -> PathBuf {
        self.args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&self.config.export.archive_name))
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let snapshot = self.load_snapshot()?;
        let level = self
            .args
            .level
            .unwrap_or(self.config.export.compression_level);
        let writer = ArchiveWriter::with_compression_level(level);

        let mut spinner = ui.start_spinner("Compressing snapshot");
        let exported = match export_snapshot(&snapshot.tree, &snapshot.contents, &writer) {
            Ok(exported) => {
                spinner.finish_success("Snapshot compressed");
                exported
            }
            Err(e) => {
                spinner.finish_error("Snapshot export failed");
                return Err(e);
            }
        };

        let output = self.output_path();
        fs::write(&output, &exported.bytes)?;
        info!(path = %output.display(), "wrote archive");

        if ui.output_mode().shows_detail() {
            for path in &exported.paths {
                ui.message(&format!("  {}", path));
            }
        }
        ui.success(&format!(
            "Exported {} directories and {} files to {} ({} bytes)",
            exported.directories,
            exported.files,
            output.display(),
            exported.bytes.len()
        ));

        Ok(CommandResult::success())
    }
}

fn read_snapshot_file(path: &Path) -> Result<SessionSnapshot> {
    let content = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PausepointError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PausepointError::Io(e)
        }
    })?;

    serde_json::from_slice(&content).map_err(|e| PausepointError::InvalidFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
