//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for phonebook operations, regardless of the UI being used.
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns** the one `ContactStore` of the session; there is no global state
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic. Validation, id assignment and
//! persistence rules live in [`crate::store`].
//!
//! `PhonebookApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `PhonebookApi<FsBackend>`
//! - Testing: `PhonebookApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{Contact, ContactId, SearchField};
use crate::store::{ContactStore, ContactUpdate, StorageBackend};
use std::path::{Path, PathBuf};

pub struct PhonebookApi<B: StorageBackend> {
    store: ContactStore<B>,
    config_dir: PathBuf,
}

impl<B: StorageBackend> PhonebookApi<B> {
    pub fn new(store: ContactStore<B>, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn open(&mut self, path: PathBuf) -> Result<commands::CmdResult> {
        commands::file::open(&mut self.store, path)
    }

    pub fn save(&mut self) -> Result<commands::CmdResult> {
        commands::file::save(&mut self.store)
    }

    pub fn save_as(&mut self, path: PathBuf) -> Result<commands::CmdResult> {
        commands::file::save_as(&mut self.store, path)
    }

    pub fn list(&self) -> commands::CmdResult {
        commands::list::run(&self.store)
    }

    pub fn show(&self, id: ContactId) -> Result<commands::CmdResult> {
        commands::list::show(&self.store, id)
    }

    pub fn create(&mut self, name: &str, phone: &str, note: &str) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, name, phone, note)
    }

    pub fn search(&self, term: &str, field: SearchField) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term, field)
    }

    pub fn update(&mut self, id: ContactId, update: &ContactUpdate) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, update)
    }

    pub fn delete(&mut self, id: ContactId) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn find(&self, id: ContactId) -> Option<&Contact> {
        self.store.find_by_id(id)
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_unsaved_changes()
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &ContactStore<B> {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};
