//! # Phonebook Architecture
//!
//! Phonebook is a small contact book kept in a single JSON file. The library holds
//! everything with a contract (validation, id assignment, persistence, search);
//! the binary is a thin shell around it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, prints, exit codes            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session's ContactStore, dispatches to commands  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Turns store outcomes into CmdResult + messages           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContactStore: contacts, next id, dirty flag, load/save   │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Failures come back as [`error::PhonebookError`]; recoverable problems
//! (a skipped entry, an odd phone number) come back as data and are logged with
//! the `log` macros.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user-facing operation
//! - [`store`]: `ContactStore` and storage backends
//! - [`model`]: `Contact` and field enums
//! - [`validation`]: Required-field and phone format checks
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod validation;
