use crate::error::{FocusError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const FOCUSCTL_DIR: &str = ".focusctl";
pub const CONFIG_FILE: &str = "config.yaml";
pub const STORE_FILE: &str = "state.redb";

/// Install directory relative to the user's home.
pub const SHORTCUTS_DIR: &str = "Library/Shortcuts";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn home_dir() -> Result<PathBuf> {
    home::home_dir().ok_or(FocusError::HomeNotFound)
}

pub fn default_root() -> Result<PathBuf> {
    Ok(home_dir()?.join(FOCUSCTL_DIR))
}

pub fn default_shortcuts_dir() -> Result<PathBuf> {
    Ok(home_dir()?.join(SHORTCUTS_DIR))
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn store_path(root: &Path) -> PathBuf {
    root.join(STORE_FILE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
