use crate::error::{PhonebookError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored contact. Allocated by the store, never reused while loaded.
pub type ContactId = u64;

/// Largest id accepted from a file, so that `id + 1` always fits.
pub const MAX_CONTACT_ID: ContactId = i64::MAX as ContactId;

const KEY_ID: &str = "id";
const KEY_NAME: &str = "name";
const KEY_PHONE: &str = "phone";
const KEY_NOTE: &str = "note";
// Older files store the note under this key.
const KEY_NOTE_LEGACY: &str = "comment";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Phone,
    Note,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Phone, ContactField::Note];

    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => KEY_NAME,
            ContactField::Phone => KEY_PHONE,
            ContactField::Note => KEY_NOTE,
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which fields a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    Name,
    Phone,
    Note,
    #[default]
    All,
}

impl SearchField {
    pub fn fields(self) -> &'static [ContactField] {
        match self {
            SearchField::Name => &[ContactField::Name],
            SearchField::Phone => &[ContactField::Phone],
            SearchField::Note => &[ContactField::Note],
            SearchField::All => &ContactField::ALL,
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(SearchField::Name),
            "phone" => Ok(SearchField::Phone),
            "note" | "comment" => Ok(SearchField::Note),
            "all" => Ok(SearchField::All),
            other => Err(format!(
                "unknown search field '{}' (expected name, phone, note or all)",
                other
            )),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchField::Name => "name",
            SearchField::Phone => "phone",
            SearchField::Note => "note",
            SearchField::All => "all",
        };
        f.write_str(s)
    }
}

/// A single phonebook entry.
///
/// All text fields are trimmed on construction and on every set, so a `Contact`
/// never carries leading or trailing whitespace. `id` is `None` only between
/// deserialization and id assignment by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: Option<ContactId>,
    name: String,
    phone: String,
    note: String,
}

impl Contact {
    pub fn new(name: &str, phone: &str, note: &str) -> Self {
        Self {
            id: None,
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            note: note.trim().to_string(),
        }
    }

    pub fn with_id(mut self, id: ContactId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<ContactId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Phone => &self.phone,
            ContactField::Note => &self.note,
        }
    }

    /// Sets a field to the trimmed `value`. Returns whether the stored value changed.
    pub fn set_field(&mut self, field: ContactField, value: &str) -> bool {
        let value = value.trim();
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Phone => &mut self.phone,
            ContactField::Note => &mut self.note,
        };
        if slot.as_str() == value {
            return false;
        }
        *slot = value.to_string();
        true
    }

    pub(crate) fn assign_id(&mut self, id: ContactId) {
        self.id = Some(id);
    }

    /// Case-insensitive substring match; `needle` must already be lowercase.
    pub fn matches(&self, needle: &str, field: SearchField) -> bool {
        field
            .fields()
            .iter()
            .any(|f| self.field(*f).to_lowercase().contains(needle))
    }

    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            KEY_ID.to_string(),
            self.id.map(Value::from).unwrap_or(Value::Null),
        );
        map.insert(KEY_NAME.to_string(), Value::from(self.name.as_str()));
        map.insert(KEY_PHONE.to_string(), Value::from(self.phone.as_str()));
        map.insert(KEY_NOTE.to_string(), Value::from(self.note.as_str()));
        map
    }

    /// Builds a contact from an untrusted mapping.
    ///
    /// This is the only gate for data coming from outside the process: `name` and
    /// `phone` must be present, be strings and be non-empty after trimming. A missing
    /// or null `note` becomes empty, a missing or null `id` stays unassigned.
    pub fn from_mapping(map: &Map<String, Value>) -> Result<Self> {
        let name = required_string(map, KEY_NAME)?;
        let phone = required_string(map, KEY_PHONE)?;

        let note = match optional_string(map, KEY_NOTE)? {
            Some(note) => note,
            None => optional_string(map, KEY_NOTE_LEGACY)?.unwrap_or(""),
        };

        let id = match map.get(KEY_ID) {
            None | Some(Value::Null) => None,
            Some(value) => Some(parse_id(value)?),
        };

        let mut contact = Contact::new(name, phone, note);
        contact.id = id;
        Ok(contact)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "ID: {}", id)?,
            None => write!(f, "ID: -")?,
        }
        write!(f, " | {} | {} | {}", self.name, self.phone, self.note)
    }
}

fn required_string<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a str> {
    let Some(value) = map.get(key) else {
        let mut found: Vec<&str> = map.keys().map(String::as_str).collect();
        found.sort_unstable();
        return Err(PhonebookError::Validation(format!(
            "missing required field '{}' (found: {})",
            key,
            found.join(", ")
        )));
    };
    let Some(text) = value.as_str() else {
        return Err(PhonebookError::Validation(format!(
            "field '{}' must be a string",
            key
        )));
    };
    crate::validation::require_field(key, text)
}

fn optional_string<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(PhonebookError::Validation(format!(
            "field '{}' must be a string",
            key
        ))),
    }
}

fn parse_id(value: &Value) -> Result<ContactId> {
    match value.as_u64() {
        Some(id) if id <= MAX_CONTACT_ID => Ok(id),
        _ => Err(PhonebookError::Validation(format!(
            "id must be a non-negative integer, got {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_new_trims_fields() {
        let contact = Contact::new("  Ivan Petrov ", " +7 900 ", "  friend\n");
        assert_eq!(contact.name(), "Ivan Petrov");
        assert_eq!(contact.phone(), "+7 900");
        assert_eq!(contact.note(), "friend");
        assert_eq!(contact.id(), None);
    }

    #[test]
    fn test_set_field_reports_change() {
        let mut contact = Contact::new("Ivan", "123", "");
        assert!(!contact.set_field(ContactField::Name, "  Ivan  "));
        assert!(contact.set_field(ContactField::Note, " colleague "));
        assert_eq!(contact.note(), "colleague");
    }

    #[test]
    fn test_to_mapping_has_all_keys() {
        let map = Contact::new("Ivan", "123", "").with_id(4).to_mapping();
        assert_eq!(
            Value::Object(map),
            json!({"id": 4, "name": "Ivan", "phone": "123", "note": ""})
        );
    }

    #[test]
    fn test_to_mapping_unassigned_id_is_null() {
        let map = Contact::new("Ivan", "123", "").to_mapping();
        assert_eq!(map.get("id"), Some(&Value::Null));
    }

    #[test]
    fn test_from_mapping_defaults() {
        let contact = Contact::from_mapping(&mapping(json!({"name": "Oleg", "phone": "5"}))).unwrap();
        assert_eq!(contact.id(), None);
        assert_eq!(contact.note(), "");
    }

    #[test]
    fn test_from_mapping_null_id_is_unassigned() {
        let contact =
            Contact::from_mapping(&mapping(json!({"id": null, "name": "Oleg", "phone": "5"})))
                .unwrap();
        assert_eq!(contact.id(), None);
    }

    #[test]
    fn test_from_mapping_reads_legacy_comment() {
        let contact = Contact::from_mapping(&mapping(
            json!({"id": 2, "name": " Maria ", "phone": "7", "comment": " ask Ivan "}),
        ))
        .unwrap();
        assert_eq!(contact.id(), Some(2));
        assert_eq!(contact.name(), "Maria");
        assert_eq!(contact.note(), "ask Ivan");
    }

    #[test]
    fn test_from_mapping_note_wins_over_comment() {
        let contact = Contact::from_mapping(&mapping(
            json!({"name": "Maria", "phone": "7", "note": "new", "comment": "old"}),
        ))
        .unwrap();
        assert_eq!(contact.note(), "new");
    }

    #[test]
    fn test_from_mapping_missing_phone() {
        let err = Contact::from_mapping(&mapping(json!({"name": "Maria"}))).unwrap_err();
        assert!(matches!(err, PhonebookError::Validation(_)));
        assert!(err.to_string().contains("'phone'"));
    }

    #[test]
    fn test_from_mapping_blank_name() {
        let err = Contact::from_mapping(&mapping(json!({"name": "  ", "phone": "1"}))).unwrap_err();
        assert!(matches!(err, PhonebookError::Validation(_)));
    }

    #[test]
    fn test_from_mapping_rejects_bad_ids() {
        for bad in [json!(-1), json!("7"), json!(1.5), json!(u64::MAX)] {
            let map = mapping(json!({"id": bad, "name": "A", "phone": "1"}));
            assert!(Contact::from_mapping(&map).is_err(), "accepted id {}", bad);
        }
    }

    #[test]
    fn test_from_mapping_rejects_non_string_fields() {
        let map = mapping(json!({"name": "A", "phone": 12345}));
        assert!(Contact::from_mapping(&map).is_err());
        let map = mapping(json!({"name": "A", "phone": "1", "note": ["x"]}));
        assert!(Contact::from_mapping(&map).is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let contact = Contact::new("Maria", "+7 111", "Ask IVAN about it");
        assert!(contact.matches("ivan", SearchField::All));
        assert!(contact.matches("ivan", SearchField::Note));
        assert!(!contact.matches("ivan", SearchField::Name));
        assert!(contact.matches("+7", SearchField::Phone));
    }

    #[test]
    fn test_search_field_parse() {
        assert_eq!("Phone".parse::<SearchField>().unwrap(), SearchField::Phone);
        assert_eq!("comment".parse::<SearchField>().unwrap(), SearchField::Note);
        assert!("email".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_display() {
        let contact = Contact::new("Ivan", "123", "hi").with_id(3);
        assert_eq!(contact.to_string(), "ID: 3 | Ivan | 123 | hi");
    }
}
