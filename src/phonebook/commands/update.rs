use crate::commands::{phone_warning, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ContactField, ContactId};
use crate::store::{ContactStore, ContactUpdate, StorageBackend};
use crate::validation::phone_is_well_formed;

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    id: ContactId,
    update: &ContactUpdate,
) -> Result<CmdResult> {
    let updated = store.update(id, update)?;
    let mut result = CmdResult::default();

    if updated.changed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Contact with ID {} left unchanged",
            id
        )));
    } else {
        if updated.changed.contains(&ContactField::Phone)
            && !phone_is_well_formed(updated.contact.phone())
        {
            result.add_message(phone_warning(updated.contact.phone()));
        }
        let fields: Vec<&str> = updated.changed.iter().map(|f| f.key()).collect();
        result.add_message(CmdMessage::success(format!(
            "Contact with ID {} updated ({})",
            id,
            fields.join(", ")
        )));
    }

    Ok(result.with_affected_contacts(vec![updated.contact]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    fn store() -> ContactStore<MemBackend> {
        let mut store = ContactStore::new(MemBackend::new(), "p.json");
        store.create("Ivan", "123", "").unwrap();
        store
    }

    #[test]
    fn reports_changed_fields() {
        let mut store = store();
        let result = run(&mut store, 1, &ContactUpdate::new().name("Ivan P.").note("x")).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert!(result.messages[0].content.contains("name, note"));
        assert_eq!(result.affected_contacts[0].name(), "Ivan P.");
    }

    #[test]
    fn no_change_is_info() {
        let mut store = store();
        let result = run(&mut store, 1, &ContactUpdate::new().phone("")).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn odd_phone_warns() {
        let mut store = store();
        let result = run(&mut store, 1, &ContactUpdate::new().phone("123 ext 4")).unwrap();
        assert!(result.has_warnings());
        assert_eq!(result.affected_contacts[0].phone(), "123 ext 4");
    }
}
