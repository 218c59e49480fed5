//! Everything that touches the terminal. Not part of the library API.

mod handlers;
mod print;
mod shell;

use crate::args::{Cli, Commands};
use log::warn;
use phonebook::api::PhonebookApi;
use phonebook::config::{config_dir, PhonebookConfig};
use phonebook::error::Result;
use phonebook::store::fs_backend::FsBackend;
use phonebook::store::ContactStore;
use std::path::PathBuf;

pub struct AppContext {
    pub api: PhonebookApi<FsBackend>,
    pub config: PhonebookConfig,
    /// File chosen at startup (`--file` or the configured default).
    pub file: PathBuf,
}

/// `RUST_LOG` wins when set; otherwise only errors, or everything with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell::run(&mut ctx),
        Commands::Config { key, value } => handlers::handle_config(&ctx, key, value),
        Commands::List => handlers::handle_list(&mut ctx),
        Commands::Show { id } => handlers::handle_show(&mut ctx, id),
        Commands::Add { name, phone, note } => handlers::handle_add(&mut ctx, name, phone, note),
        Commands::Search { term, field } => handlers::handle_search(&mut ctx, term, field),
        Commands::Edit {
            id,
            name,
            phone,
            note,
        } => handlers::handle_edit(&mut ctx, id, name, phone, note),
        Commands::Delete { id } => handlers::handle_delete(&mut ctx, id),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = PhonebookConfig::load(&config_dir).unwrap_or_else(|err| {
        warn!("Ignoring unreadable config in {}: {}", config_dir.display(), err);
        PhonebookConfig::default()
    });

    let file = cli
        .file
        .clone()
        .unwrap_or_else(|| config.default_file.clone());
    let store = ContactStore::new(FsBackend::new(), file.clone());
    let api = PhonebookApi::new(store, config_dir);

    Ok(AppContext { api, config, file })
}
