use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ContactId;
use crate::store::{ContactStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut ContactStore<B>, id: ContactId) -> Result<CmdResult> {
    let removed = store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Contact with ID {} deleted: {}",
        id,
        removed.name()
    )));
    Ok(result.with_affected_contacts(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhonebookError;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn removes_contact() {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        store.create("Ivan", "1", "").unwrap();

        let result = run(&mut store, 1).unwrap();
        assert_eq!(result.affected_contacts[0].name(), "Ivan");
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        assert!(matches!(run(&mut store, 3), Err(PhonebookError::NotFound(3))));
    }
}
