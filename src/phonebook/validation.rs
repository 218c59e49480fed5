//! Field validation for contacts.
//!
//! Two kinds of checks live here:
//! - **Hard** checks (`require_field`, `search_term`) reject an operation.
//! - **Advisory** checks (`phone_is_well_formed`) only produce a warning; callers
//!   must never refuse a contact because of them.

use crate::error::{PhonebookError, Result};

/// Punctuation accepted in a phone number besides ASCII digits.
const PHONE_PUNCTUATION: [char; 5] = [' ', '+', '-', '(', ')'];

/// Returns the trimmed value, or a validation error naming `field` when nothing
/// is left after trimming.
///
/// # Examples
/// ```
/// use phonebook::validation::require_field;
///
/// assert_eq!(require_field("name", "  Ivan ").unwrap(), "Ivan");
/// assert!(require_field("phone", "   ").is_err());
/// ```
pub fn require_field<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PhonebookError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed)
}

/// Advisory phone format check: digits, spaces, `+`, `-`, `(` and `)` only.
///
/// # Examples
/// ```
/// use phonebook::validation::phone_is_well_formed;
///
/// assert!(phone_is_well_formed("+7 (912) 345-67-89"));
/// assert!(!phone_is_well_formed("call me"));
/// ```
pub fn phone_is_well_formed(phone: &str) -> bool {
    phone
        .chars()
        .all(|c| c.is_ascii_digit() || PHONE_PUNCTUATION.contains(&c))
}

/// Normalizes a search term for case-insensitive matching.
///
/// An empty term is rejected rather than treated as "match everything".
pub fn search_term(term: &str) -> Result<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(PhonebookError::Validation(
            "search term cannot be empty".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}
