use super::backend::StorageBackend;
use crate::error::{PhonebookError, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Production backend: plain files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsBackend;

impl FsBackend {
    pub fn new() -> Self {
        Self
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(PhonebookError::Io)?;
        }
        Ok(())
    }

    /// Sibling temp file, so the final rename never crosses filesystems.
    fn tmp_path(&self, path: &Path) -> PathBuf {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "phonebook".to_string());
        path.with_file_name(format!(".{}-{}.tmp", file_name, Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist", path.display());
                return Ok(None);
            }
            Err(err) => return Err(PhonebookError::Io(err)),
        };
        debug!("read {} bytes from {}", bytes.len(), path.display());

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| PhonebookError::corrupt(path, format!("not valid UTF-8 ({})", err)))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.ensure_dir(parent)?;
        }

        let tmp_file = self.tmp_path(path);
        let written = fs::write(&tmp_file, content).and_then(|_| fs::rename(&tmp_file, path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_file);
            return Err(PhonebookError::Io(err));
        }

        debug!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}
