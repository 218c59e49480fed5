//! On-disk layout of a phonebook file.
//!
//! ```text
//! {
//!   "contacts": [
//!     { "id": 1, "name": "Ivan Petrov", "phone": "+7 900 000-00-00", "note": "" }
//!   ],
//!   "last_updated": "2024-05-01T10:00:00+00:00"
//! }
//! ```
//!
//! Parsing is split in two stages: this module only checks the file-level shape
//! and hands back raw entries. Per-entry validation happens in
//! [`Contact::from_mapping`](crate::model::Contact::from_mapping) so that one bad
//! entry never fails the whole file.

use crate::error::{PhonebookError, Result};
use crate::model::Contact;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

const KEY_CONTACTS: &str = "contacts";

#[derive(Serialize)]
struct Document {
    contacts: Vec<Map<String, Value>>,
    last_updated: String,
}

/// Extracts the raw contact entries from the file text.
pub(crate) fn parse_entries(path: &Path, text: &str) -> Result<Vec<Value>> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| PhonebookError::corrupt(path, err.to_string()))?;

    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(PhonebookError::corrupt(
                path,
                format!("expected an object at the top level, found {}", kind_of(&other)),
            ))
        }
    };

    match root.remove(KEY_CONTACTS) {
        None => Ok(Vec::new()),
        Some(Value::Array(entries)) => Ok(entries),
        Some(other) => Err(PhonebookError::corrupt(
            path,
            format!("'{}' must be a list, found {}", KEY_CONTACTS, kind_of(&other)),
        )),
    }
}

pub(crate) fn render(contacts: &[Contact], now: DateTime<Utc>) -> Result<String> {
    let document = Document {
        contacts: contacts.iter().map(Contact::to_mapping).collect(),
        last_updated: now.to_rfc3339(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_missing_contacts_key_is_empty() {
        let entries = parse_entries(Path::new("p.json"), r#"{"last_updated": "x"}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_entries_returned_in_order() {
        let entries = parse_entries(
            Path::new("p.json"),
            r#"{"contacts": [{"name": "a"}, 3, {"name": "b"}]}"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2]["name"], "b");
    }

    #[test]
    fn test_malformed_json_is_corrupt() {
        let err = parse_entries(Path::new("p.json"), "{\"contacts\": [").unwrap_err();
        assert!(matches!(err, PhonebookError::CorruptFile { .. }));
    }

    #[test]
    fn test_wrong_shapes_are_corrupt() {
        for text in ["[]", "\"contacts\"", r#"{"contacts": {"id": 1}}"#, r#"{"contacts": null}"#] {
            let err = parse_entries(Path::new("p.json"), text).unwrap_err();
            assert!(
                matches!(err, PhonebookError::CorruptFile { .. }),
                "accepted {}",
                text
            );
        }
    }

    #[test]
    fn test_render_layout() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let contacts = vec![Contact::new("Ivan", "1", "Привет").with_id(1)];
        let text = render(&contacts, now).unwrap();

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["last_updated"], "2024-05-01T10:00:00+00:00");
        assert_eq!(value["contacts"][0]["id"], 1);
        assert_eq!(value["contacts"][0]["note"], "Привет");
        // Non-ASCII is written verbatim, not escaped.
        assert!(text.contains("Привет"));
    }
}
