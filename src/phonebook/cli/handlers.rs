use super::print::{print_config, print_contacts, print_messages};
use super::AppContext;
use phonebook::api::{ConfigAction, MessageLevel};
use phonebook::model::{ContactId, SearchField};
use phonebook::error::Result;
use phonebook::store::ContactUpdate;

/// Loads the startup file, showing only what needs attention.
fn open_quietly(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.open(ctx.file.clone())?;
    let notable: Vec<_> = result
        .messages
        .into_iter()
        .filter(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
        .collect();
    print_messages(&notable);
    Ok(())
}

/// Persists a one-shot mutation, unless autosave is off.
fn finish(ctx: &mut AppContext) -> Result<()> {
    if !ctx.api.has_unsaved_changes() {
        return Ok(());
    }
    if ctx.config.autosave {
        let result = ctx.api.save()?;
        print_messages(&result.messages);
    } else {
        println!("Changes not saved (autosave is off).");
    }
    Ok(())
}

pub(super) fn handle_list(ctx: &mut AppContext) -> Result<()> {
    open_quietly(ctx)?;
    let result = ctx.api.list();
    print_contacts(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_show(ctx: &mut AppContext, id: ContactId) -> Result<()> {
    open_quietly(ctx)?;
    let result = ctx.api.show(id)?;
    print_contacts(&result.listed_contacts);
    Ok(())
}

pub(super) fn handle_add(
    ctx: &mut AppContext,
    name: String,
    phone: String,
    note: String,
) -> Result<()> {
    open_quietly(ctx)?;
    let result = ctx.api.create(&name, &phone, &note)?;
    print_messages(&result.messages);
    finish(ctx)
}

pub(super) fn handle_search(ctx: &mut AppContext, term: String, field: SearchField) -> Result<()> {
    open_quietly(ctx)?;
    let result = ctx.api.search(&term, field)?;
    print_contacts(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(())
}

pub(super) fn handle_edit(
    ctx: &mut AppContext,
    id: ContactId,
    name: Option<String>,
    phone: Option<String>,
    note: Option<String>,
) -> Result<()> {
    open_quietly(ctx)?;
    let update = ContactUpdate { name, phone, note };
    let result = ctx.api.update(id, &update)?;
    print_messages(&result.messages);
    finish(ctx)
}

pub(super) fn handle_delete(ctx: &mut AppContext, id: ContactId) -> Result<()> {
    open_quietly(ctx)?;
    let result = ctx.api.delete(id)?;
    print_messages(&result.messages);
    finish(ctx)
}

pub(super) fn handle_config(
    ctx: &AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
