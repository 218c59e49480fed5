use crate::error::{PhonebookError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE: &str = "phonebook.json";

/// Overrides the config directory (used by tests and portable setups).
pub const CONFIG_DIR_ENV: &str = "PHONEBOOK_CONFIG_DIR";

pub const CONFIG_KEYS: [&str; 3] = ["default-file", "confirm-delete", "autosave"];

/// Configuration for the phonebook, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PhonebookConfig {
    /// Phonebook file opened on startup when `--file` is not given
    pub default_file: PathBuf,

    /// Ask before deleting a contact in the interactive shell
    pub confirm_delete: bool,

    /// Save right after a mutating one-shot command
    pub autosave: bool,
}

impl Default for PhonebookConfig {
    fn default() -> Self {
        Self {
            default_file: PathBuf::from(DEFAULT_FILE),
            confirm_delete: true,
            autosave: true,
        }
    }
}

/// Where the config lives: `$PHONEBOOK_CONFIG_DIR`, else the platform config dir.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "phonebook", "phonebook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PhonebookError::Config("could not determine config directory".to_string()))
}

impl PhonebookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(PhonebookError::Io)?;
        let config: PhonebookConfig =
            serde_json::from_str(&content).map_err(PhonebookError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(PhonebookError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(PhonebookError::Serialization)?;
        fs::write(config_path, content).map_err(PhonebookError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default-file" => Some(self.default_file.display().to_string()),
            "confirm-delete" => Some(self.confirm_delete.to_string()),
            "autosave" => Some(self.autosave.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "default-file" => {
                let value = value.trim();
                if value.is_empty() {
                    return Err("default-file cannot be empty".to_string());
                }
                self.default_file = PathBuf::from(value);
            }
            "confirm-delete" => self.confirm_delete = parse_bool(key, value)?,
            "autosave" => self.autosave = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("{} expects true or false, got '{}'", key, other)),
    }
}
