use anyhow::Context;
use focusctl_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the focusctl state directory.
///
/// Priority:
/// 1. `--root` flag / `FOCUSCTL_ROOT` env var (passed in as `explicit`)
/// 2. `~/.focusctl`
pub fn resolve_root(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    paths::default_root().context("cannot locate the focusctl state directory")
}
