pub mod config;
pub mod list;
pub mod mode;
pub mod shortcuts;
pub mod status;

use anyhow::Context;
use focusctl_core::paths;
use focusctl_core::store::RedbStore;
use focusctl_core::FocusEngine;
use std::path::Path;

/// Open the persistent state store under `root`.
pub fn open_engine(root: &Path) -> anyhow::Result<FocusEngine<RedbStore>> {
    let path = paths::store_path(root);
    let store = RedbStore::open(&path)
        .with_context(|| format!("failed to open focus state at {}", path.display()))?;
    Ok(FocusEngine::new(store))
}
