use crate::error::Result;
use std::path::Path;

/// Abstract interface for raw file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while `ContactStore` handles the "what" (parsing, validation, id assignment).
pub trait StorageBackend {
    /// Read the whole file at `path`.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure) or
    /// content that cannot be decoded as text.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// Replace the file at `path` with `content`.
    /// MUST be atomic (e.g. write to tmp then rename): on failure the previous
    /// content of `path` stays intact.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}
