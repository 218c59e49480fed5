//! # Storage Layer
//!
//! [`ContactStore`] owns the in-memory contact list and keeps it reconciled with a
//! single backing file. Raw I/O goes through the [`StorageBackend`] trait.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production file-based storage
//!   - Atomic writes (temp file + rename)
//!   - A missing file reads as `None`, not as an error
//!
//! - [`mem_backend::MemBackend`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## State
//!
//! Besides the contacts, the store tracks:
//! - `path`: the file `save` writes to. Repointed only by a successful `load`/`save_as`.
//! - `next_id`: always greater than every id currently held.
//! - `dirty`: true iff memory differs from what was last read from or written to `path`.
//!
//! ## Loading
//!
//! Loading is tolerant per entry and strict per file:
//! - A missing file is an empty phonebook.
//! - A file that is not a JSON object with a `contacts` list fails with
//!   [`PhonebookError::CorruptFile`] and leaves the store untouched.
//! - Entries that fail validation are skipped and reported in the [`LoadReport`].
//! - Entries without an id (or repeating an id already seen) get fresh ids in file
//!   order. This marks the store dirty, since the file no longer matches memory.

use crate::error::{PhonebookError, Result};
use crate::model::{Contact, ContactField, ContactId, SearchField, MAX_CONTACT_ID};
use crate::validation::{phone_is_well_formed, require_field, search_term};
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub mod backend;
mod document;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

/// An entry that was dropped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// 1-based position in the file's `contacts` list.
    pub position: usize,
    pub reason: String,
}

/// Outcome of a successful [`ContactStore::load`].
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub path: PathBuf,
    /// False when the file did not exist and an empty phonebook was started.
    pub file_found: bool,
    pub loaded: usize,
    pub skipped: Vec<SkippedEntry>,
    /// Ids handed out during the load, in file order.
    pub assigned_ids: Vec<ContactId>,
    /// Ids that appeared more than once in the file.
    pub duplicate_ids: Vec<ContactId>,
}

/// Field changes for [`ContactStore::update`].
///
/// `None` leaves a field alone. So does a value that is empty after trimming,
/// which means a field cannot be blanked through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub note: Option<String>,
}

impl ContactUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => self.name.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
            ContactField::Note => self.note.as_deref(),
        }
    }
}

/// Outcome of [`ContactStore::update`].
#[derive(Debug, Clone)]
pub struct Updated {
    pub contact: Contact,
    pub changed: Vec<ContactField>,
}

pub struct ContactStore<B: StorageBackend> {
    backend: B,
    path: PathBuf,
    contacts: Vec<Contact>,
    next_id: ContactId,
    dirty: bool,
}

impl<B: StorageBackend> ContactStore<B> {
    /// An empty, clean store that will save to `path`. Nothing is read yet.
    pub fn new(backend: B, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
            contacts: Vec::new(),
            next_id: 1,
            dirty: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn next_id(&self) -> ContactId {
        self.next_id
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Replaces the store's contents with the file at `path`.
    ///
    /// On error nothing changes, including the current path.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<LoadReport> {
        let path = path.into();

        let Some(text) = self.backend.read(&path)? else {
            info!("{} not found, starting an empty phonebook", path.display());
            self.contacts.clear();
            self.next_id = 1;
            self.dirty = false;
            self.path = path.clone();
            return Ok(LoadReport {
                path,
                ..LoadReport::default()
            });
        };

        let entries = document::parse_entries(&path, &text)?;
        let mut contacts = Vec::with_capacity(entries.len());
        let mut skipped = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            let parsed = match entry {
                Value::Object(map) => Contact::from_mapping(map),
                other => Err(PhonebookError::Validation(format!(
                    "expected an object, found {}",
                    document::kind_of(other)
                ))),
            };
            match parsed {
                Ok(contact) => contacts.push(contact),
                Err(err) => {
                    warn!(
                        "Skipping contact #{} in {}: {}",
                        index + 1,
                        path.display(),
                        err
                    );
                    skipped.push(SkippedEntry {
                        position: index + 1,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let assignment = assign_ids(&mut contacts);
        let report = LoadReport {
            path: path.clone(),
            file_found: true,
            loaded: contacts.len(),
            skipped,
            assigned_ids: assignment.assigned,
            duplicate_ids: assignment.duplicates,
        };

        self.contacts = contacts;
        self.next_id = assignment.next_id;
        self.dirty = !report.assigned_ids.is_empty();
        self.path = path;

        info!(
            "Loaded {} contacts from {} ({} skipped, {} ids assigned)",
            report.loaded,
            report.path.display(),
            report.skipped.len(),
            report.assigned_ids.len()
        );
        Ok(report)
    }

    /// Writes every contact to the current path.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone();
        self.write_to(&path)?;
        self.dirty = false;
        Ok(())
    }

    /// Writes every contact to `path` and makes it the current path.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.write_to(&path)?;
        self.path = path;
        self.dirty = false;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        let content = document::render(&self.contacts, Utc::now())?;
        self.backend.write(path, &content)?;
        info!("Saved {} contacts to {}", self.contacts.len(), path.display());
        Ok(())
    }

    pub fn create(&mut self, name: &str, phone: &str, note: &str) -> Result<Contact> {
        let name = require_field("name", name)?;
        let phone = require_field("phone", phone)?;
        if !phone_is_well_formed(phone) {
            warn!("Phone '{}' contains unexpected characters", phone);
        }

        if self.next_id > MAX_CONTACT_ID {
            return Err(PhonebookError::Validation(format!(
                "no contact ids left, the largest id {} is already taken",
                MAX_CONTACT_ID
            )));
        }

        let contact = Contact::new(name, phone, note).with_id(self.next_id);
        self.next_id += 1;
        self.contacts.push(contact.clone());
        self.dirty = true;
        debug!("Created contact {}", self.next_id - 1);
        Ok(contact)
    }

    pub fn find_by_id(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id() == Some(id))
    }

    /// Like [`find_by_id`](Self::find_by_id), but a missing id is an error.
    pub fn get(&self, id: ContactId) -> Result<&Contact> {
        self.find_by_id(id).ok_or(PhonebookError::NotFound(id))
    }

    /// Contacts whose selected field(s) contain `term`, ignoring case, in store order.
    pub fn search(&self, term: &str, field: SearchField) -> Result<Vec<&Contact>> {
        let needle = search_term(term)?;
        Ok(self
            .contacts
            .iter()
            .filter(|c| c.matches(&needle, field))
            .collect())
    }

    pub fn update(&mut self, id: ContactId, update: &ContactUpdate) -> Result<Updated> {
        let index = self.position(id)?;
        let contact = &mut self.contacts[index];

        let mut changed = Vec::new();
        for field in ContactField::ALL {
            let Some(value) = update.get(field).filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            if field == ContactField::Phone && !phone_is_well_formed(value.trim()) {
                warn!("Phone '{}' contains unexpected characters", value.trim());
            }
            if contact.set_field(field, value) {
                changed.push(field);
            }
        }

        if !changed.is_empty() {
            self.dirty = true;
            debug!("Updated contact {}: {:?}", id, changed);
        }
        Ok(Updated {
            contact: self.contacts[index].clone(),
            changed,
        })
    }

    /// Removes and returns the contact with `id`.
    pub fn delete(&mut self, id: ContactId) -> Result<Contact> {
        let index = self.position(id)?;
        let removed = self.contacts.remove(index);
        self.dirty = true;
        debug!("Deleted contact {}", id);
        Ok(removed)
    }

    fn position(&self, id: ContactId) -> Result<usize> {
        self.contacts
            .iter()
            .position(|c| c.id() == Some(id))
            .ok_or(PhonebookError::NotFound(id))
    }
}

struct IdAssignment {
    next_id: ContactId,
    assigned: Vec<ContactId>,
    duplicates: Vec<ContactId>,
}

/// Gives every contact a unique id.
///
/// Allocation starts above the largest id present. Contacts without an id, or
/// whose id was already taken by an earlier contact, are numbered in order.
/// Once the id range is used up, the lowest free ids are handed out instead.
fn assign_ids(contacts: &mut [Contact]) -> IdAssignment {
    let mut taken: HashSet<ContactId> = contacts.iter().filter_map(Contact::id).collect();
    let mut next_id = taken.iter().max().map_or(1, |max| max + 1);

    let mut seen = HashSet::new();
    let mut assigned = Vec::new();
    let mut duplicates = Vec::new();

    for contact in contacts.iter_mut() {
        if let Some(existing) = contact.id() {
            if seen.insert(existing) {
                continue;
            }
            duplicates.push(existing);
        }

        let id = if next_id <= MAX_CONTACT_ID {
            next_id += 1;
            next_id - 1
        } else {
            lowest_free_id(&taken)
        };
        match contact.id() {
            Some(existing) => warn!("Duplicate contact id {}, renumbering to {}", existing, id),
            None => debug!("Assigning id {} to '{}'", id, contact.name()),
        }
        taken.insert(id);
        contact.assign_id(id);
        assigned.push(id);
    }

    IdAssignment {
        next_id,
        assigned,
        duplicates,
    }
}

fn lowest_free_id(taken: &HashSet<ContactId>) -> ContactId {
    let mut id = 1;
    while taken.contains(&id) {
        id += 1;
    }
    id
}
