use crate::error::{FocusError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write `data` to `path` using a tempfile in the same directory.
/// An existing file at `path` is replaced.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp =
        NamedTempFile::new_in(dir).map_err(FocusError::file_op("create temp file in", dir))?;
    tmp.write_all(data)
        .map_err(FocusError::file_op("write", tmp.path()))?;
    tmp.persist(path)
        .map_err(|e| FocusError::file_op("write", path)(e.error))?;
    Ok(())
}

/// Create a directory and all parents, idempotent.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(FocusError::file_op("create directory", path))
}

/// Write a file only if it does not already exist. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents_and_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let shortcuts = dir.path().join("Library/Shortcuts");
        let path = shortcuts.join("FocusCTL - Toggle Work Focus.shortcut");
        atomic_write(&path, b"{\"WFWorkflowActions\": []}\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"WFWorkflowActions\": []}\n"
        );
        let names: Vec<_> = std::fs::read_dir(&shortcuts)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![path.file_name().unwrap().to_os_string()]);
    }

    #[test]
    fn atomic_write_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.txt");
        atomic_write(&path, b"one").unwrap();
        atomic_write(&path, b"two").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "two");
    }

    #[test]
    fn atomic_write_onto_directory_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).unwrap();
        let err = atomic_write(&path, b"data").unwrap_err();
        assert!(matches!(
            err,
            FocusError::FileOp { ref path, .. } if path.ends_with("occupied")
        ));
    }

    #[test]
    fn write_if_missing_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/config.yaml");
        assert!(write_if_missing(&path, b"version: 1\n").unwrap());
        assert!(!write_if_missing(&path, b"version: 2\n").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "version: 1\n");
    }
}
