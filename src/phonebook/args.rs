use clap::{Parser, Subcommand};
use phonebook::model::{ContactId, SearchField};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phonebook", version)]
#[command(about = "A small, file-backed contact book", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Phonebook file to use instead of the configured default
    #[arg(short, long, global = true, env = "PHONEBOOK_FILE")]
    pub file: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all contacts
    #[command(alias = "ls")]
    List,

    /// Show one contact
    Show { id: ContactId },

    /// Create a new contact
    #[command(alias = "n")]
    Add {
        name: String,

        phone: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// Search contacts (case-insensitive substring)
    #[command(alias = "find")]
    Search {
        term: String,

        /// Field to search: name, phone, note or all
        #[arg(long, default_value = "all")]
        field: SearchField,
    },

    /// Change fields of a contact; omitted fields are left as they are
    #[command(alias = "e")]
    Edit {
        id: ContactId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        note: Option<String>,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete { id: ContactId },

    /// Get or set configuration
    Config {
        /// Configuration key (default-file, confirm-delete, autosave)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Interactive menu (the default when no command is given)
    Shell,
}
