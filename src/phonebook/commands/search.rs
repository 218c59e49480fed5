use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SearchField;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &ContactStore<B>,
    term: &str,
    field: SearchField,
) -> Result<CmdResult> {
    let matches: Vec<_> = store
        .search(term, field)?
        .into_iter()
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info("No contacts found."));
    } else {
        result.add_message(CmdMessage::info(format!(
            "Found {} contact(s)",
            matches.len()
        )));
    }
    Ok(result.with_listed_contacts(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn lists_matches_in_store_order() {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        store.create("Ivan Petrov", "1", "").unwrap();
        store.create("Maria", "2", "ask Ivan").unwrap();
        store.create("Oleg", "3", "").unwrap();

        let result = run(&store, "ivan", SearchField::All).unwrap();
        let ids: Vec<_> = result.listed_contacts.iter().filter_map(|c| c.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn empty_result_has_message() {
        let store = ContactStore::new(MemBackend::new(), "p.json");
        let result = run(&store, "x", SearchField::Name).unwrap();
        assert!(result.listed_contacts.is_empty());
        assert_eq!(result.messages[0].content, "No contacts found.");
    }
}
