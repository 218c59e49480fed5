use super::backend::StorageBackend;
use crate::error::{PhonebookError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the phonebook is single-threaded.
/// This lets the `StorageBackend` trait take `&self` for writes.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<PathBuf, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file, as if it had been written by an earlier run.
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), content.into());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Current content of a file, if any.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(PhonebookError::Io(io::Error::new(
                io::ErrorKind::Other,
                "Simulated write error",
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
