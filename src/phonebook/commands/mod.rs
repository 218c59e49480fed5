use crate::config::PhonebookConfig;
use crate::model::Contact;
use crate::store::LoadReport;

pub mod config;
pub mod create;
pub mod delete;
pub mod file;
pub mod list;
pub mod search;
pub mod update;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_contacts: Vec<Contact>,
    pub listed_contacts: Vec<Contact>,
    pub load_report: Option<LoadReport>,
    pub config: Option<PhonebookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.affected_contacts = contacts;
        self
    }

    pub fn with_listed_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.listed_contacts = contacts;
        self
    }

    pub fn with_config(mut self, config: PhonebookConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}

pub(crate) fn phone_warning(phone: &str) -> CmdMessage {
    CmdMessage::warning(format!(
        "Phone '{}' should contain only digits, spaces, +, -, ( and )",
        phone
    ))
}
