use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use tracing::debug;

use super::SnapshotStore;
use crate::error::AppError;

/// Snapshot kept in a single JSON file.
///
/// Writes go to `<file>.tmp` and are renamed into place while an exclusive
/// OS lock on `<file>.lock` is held, so a reader never sees a torn snapshot
/// and two processes never interleave their writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(suffix);
        PathBuf::from(name)
    }

    fn lock(&self) -> Result<File, AppError> {
        let lock_path = self.sibling(".lock");
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| {
                AppError::storage(format!("failed to open lock file {}: {e}", lock_path.display()))
            })?;
        FileExt::lock_exclusive(&file).map_err(|e| {
            AppError::storage(format!("failed to lock {}: {e}", lock_path.display()))
        })?;
        Ok(file)
    }
}

impl SnapshotStore for FileStore {
    fn load(&mut self) -> Result<Option<String>, AppError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                debug!(path = %self.path.display(), bytes = blob.len(), "Snapshot loaded");
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn save(&mut self, blob: &str) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        // Released when dropped.
        let _guard = self.lock()?;

        let tmp_path = self.sibling(".tmp");
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(blob.as_bytes())?;
        tmp.sync_all()?;
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            AppError::storage(format!("failed to replace {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), bytes = blob.len(), "Snapshot saved");
        Ok(())
    }
}
