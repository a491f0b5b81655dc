//! Persistence port for session snapshots.
//!
//! The core only ever hands a store an encoded blob and asks for the last
//! one back; where it lives is up to the implementation.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::AppError;

pub trait SnapshotStore {
    /// Last saved blob, or `None` if nothing was ever saved.
    fn load(&mut self) -> Result<Option<String>, AppError>;

    /// Replace the saved blob.
    fn save(&mut self, blob: &str) -> Result<(), AppError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&mut self) -> Result<Option<String>, AppError> {
        (**self).load()
    }

    fn save(&mut self, blob: &str) -> Result<(), AppError> {
        (**self).save(blob)
    }
}
