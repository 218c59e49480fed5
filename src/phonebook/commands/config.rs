use crate::commands::{CmdMessage, CmdResult};
use crate::config::PhonebookConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = PhonebookConfig::load(config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => return Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => result.add_message(match config.get(&key) {
            Some(value) => CmdMessage::info(value),
            None => CmdMessage::error(format!("Unknown config key: {}", key)),
        }),
        ConfigAction::Set(key, value) => {
            if let Err(reason) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(reason));
                return Ok(result);
            }
            if key == "default-file" {
                match check_phonebook_path(&config.default_file) {
                    Ok(Some(warning)) => result.add_message(CmdMessage::warning(warning)),
                    Ok(None) => {}
                    Err(reason) => {
                        result.add_message(CmdMessage::error(reason));
                        return Ok(result);
                    }
                }
            }
            config.save(config_dir)?;
            let shown = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            return Ok(result.with_config(config));
        }
    }
    Ok(result)
}

/// A directory can never hold a phonebook. A missing parent directory is only
/// worth a warning: the first save creates it.
fn check_phonebook_path(path: &Path) -> std::result::Result<Option<String>, String> {
    if path.is_dir() {
        return Err(format!("{} is a directory, not a phonebook file", path.display()));
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => Ok(Some(format!(
            "Directory {} does not exist yet; it will be created on the first save",
            parent.display()
        ))),
        _ => Ok(None),
    }
}
