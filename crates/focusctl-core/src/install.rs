//! Install, list, and remove exported Shortcuts actions.
//!
//! The install directory is the only record of what is installed: every
//! query re-reads it, and any entry whose name contains
//! [`PRODUCT_MARKER`] counts as ours.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SshConfig;
use crate::error::{FocusError, Result};
use crate::io;
use crate::shortcut::{ShortcutAction, PRODUCT_MARKER};

/// Outcome of `install_all`. Failures do not stop the remaining installs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstallSummary {
    pub installed: usize,
    pub attempted: usize,
    pub failures: Vec<InstallFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallFailure {
    pub name: String,
    pub error: String,
}

pub struct Installer {
    dir: PathBuf,
    ssh: SshConfig,
}

impl Installer {
    /// Bind to `dir`, creating it if absent. A creation failure is logged;
    /// the next operation on the directory reports it.
    pub fn open(dir: impl Into<PathBuf>, ssh: SshConfig) -> Self {
        let dir = dir.into();
        if let Err(e) = io::ensure_dir(&dir) {
            tracing::warn!(error = %e, "could not create Shortcuts directory");
        }
        Self { dir, ssh }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, action: &ShortcutAction) -> PathBuf {
        self.dir.join(action.file_name())
    }

    /// Write `action` into the install directory, replacing any previous copy.
    pub fn install(&self, action: &ShortcutAction) -> Result<PathBuf> {
        io::ensure_dir(&self.dir)?;
        let path = self.path_for(action);
        let data = action.serialize(&self.ssh)?;
        io::atomic_write(&path, &data)?;
        tracing::debug!(path = %path.display(), "installed shortcut action");
        Ok(path)
    }

    /// Install one action per catalog mode, tallying failures instead of aborting.
    pub fn install_all(&self) -> InstallSummary {
        let actions = ShortcutAction::all();
        let mut summary = InstallSummary {
            attempted: actions.len(),
            ..InstallSummary::default()
        };
        for action in &actions {
            match self.install(action) {
                Ok(_) => summary.installed += 1,
                Err(e) => {
                    tracing::warn!(
                        name = %action.name,
                        error = %e,
                        "failed to install shortcut action"
                    );
                    summary.failures.push(InstallFailure {
                        name: action.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        summary
    }

    /// Names of installed entries, sorted.
    ///
    /// Names that are not valid UTF-8 are shown lossily.
    pub fn list(&self) -> Result<Vec<String>> {
        let paths = self.entries()?;
        Ok(paths.iter().map(PathBuf::as_path).map(display_name).collect())
    }

    /// Delete every installed entry in `list` order.
    ///
    /// Stops at the first entry that cannot be removed; entries after it
    /// stay in place. Returns the names removed.
    pub fn uninstall_all(&self) -> Result<Vec<String>> {
        let mut removed = Vec::new();
        for path in self.entries()? {
            std::fs::remove_file(&path).map_err(FocusError::file_op("remove", &path))?;
            tracing::debug!(path = %path.display(), "removed shortcut action");
            removed.push(display_name(&path));
        }
        Ok(removed)
    }

    /// Paths of entries whose name contains the product marker, sorted by name.
    fn entries(&self) -> Result<Vec<PathBuf>> {
        let entries =
            std::fs::read_dir(&self.dir).map_err(FocusError::file_op("read", &self.dir))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(FocusError::file_op("read", &self.dir))?;
            if entry.file_name().to_string_lossy().contains(PRODUCT_MARKER) {
                paths.push(entry.path());
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
