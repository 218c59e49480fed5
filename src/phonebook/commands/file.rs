use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContactId;
use crate::store::{ContactStore, StorageBackend};
use std::path::PathBuf;

/// Loads `path` into the store, turning the load report into messages.
pub fn open<B: StorageBackend>(store: &mut ContactStore<B>, path: PathBuf) -> Result<CmdResult> {
    let report = store.load(path)?;
    let mut result = CmdResult::default();

    if !report.file_found {
        result.add_message(CmdMessage::info(format!(
            "File {} not found. Started a new phonebook.",
            report.path.display()
        )));
    }
    for skipped in &report.skipped {
        result.add_message(CmdMessage::warning(format!(
            "Skipped invalid contact #{}: {}",
            skipped.position, skipped.reason
        )));
    }
    if !report.duplicate_ids.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Duplicate IDs renumbered: {}",
            join_ids(&report.duplicate_ids)
        )));
    }
    if !report.assigned_ids.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Assigned new IDs: {} (save to keep them)",
            join_ids(&report.assigned_ids)
        )));
    }
    if report.file_found {
        result.add_message(CmdMessage::success(format!(
            "Loaded {} contact(s) from {}",
            report.loaded,
            report.path.display()
        )));
    }

    result.load_report = Some(report);
    Ok(result)
}

pub fn save<B: StorageBackend>(store: &mut ContactStore<B>) -> Result<CmdResult> {
    store.save()?;
    Ok(saved_message(store))
}

pub fn save_as<B: StorageBackend>(store: &mut ContactStore<B>, path: PathBuf) -> Result<CmdResult> {
    store.save_as(path)?;
    Ok(saved_message(store))
}

fn saved_message<B: StorageBackend>(store: &ContactStore<B>) -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Phonebook saved to {}",
        store.path().display()
    )));
    result
}

fn join_ids(ids: &[ContactId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
