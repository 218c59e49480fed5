use crate::model::ContactId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhonebookError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Phonebook file {} is corrupt: {reason}", .path.display())]
    CorruptFile { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Contact not found: {0}")]
    NotFound(ContactId),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl PhonebookError {
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PhonebookError>;
