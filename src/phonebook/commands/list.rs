use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContactId;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &ContactStore<B>) -> CmdResult {
    let mut result = CmdResult::default();
    if store.is_empty() {
        result.add_message(CmdMessage::info("The phonebook is empty."));
    }
    result.with_listed_contacts(store.contacts().to_vec())
}

pub fn show<B: StorageBackend>(store: &ContactStore<B>, id: ContactId) -> Result<CmdResult> {
    let contact = store.get(id)?.clone();
    Ok(CmdResult::default().with_listed_contacts(vec![contact]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhonebookError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn lists_everything() {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        store.create("Ivan", "1", "").unwrap();
        store.create("Maria", "2", "").unwrap();

        let result = run(&store);
        assert_eq!(result.listed_contacts.len(), 2);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_store_message() {
        let store = ContactStore::new(MemBackend::new(), "p.json");
        assert_eq!(run(&store).messages.len(), 1);
    }

    #[test]
    fn show_by_id() {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        store.create("Ivan", "1", "").unwrap();

        assert_eq!(show(&store, 1).unwrap().listed_contacts[0].name(), "Ivan");
        assert!(matches!(show(&store, 2), Err(PhonebookError::NotFound(2))));
    }
}
