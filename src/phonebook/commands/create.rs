use crate::commands::{phone_warning, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{ContactStore, StorageBackend};
use crate::validation::phone_is_well_formed;

pub fn run<B: StorageBackend>(
    store: &mut ContactStore<B>,
    name: &str,
    phone: &str,
    note: &str,
) -> Result<CmdResult> {
    let contact = store.create(name, phone, note)?;

    let mut result = CmdResult::default();
    if !phone_is_well_formed(contact.phone()) {
        result.add_message(phone_warning(contact.phone()));
    }
    if let Some(id) = contact.id() {
        result.add_message(CmdMessage::success(format!(
            "Contact '{}' created with ID {}",
            contact.name(),
            id
        )));
    }
    Ok(result.with_affected_contacts(vec![contact]))
}
