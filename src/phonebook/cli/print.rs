use colored::Colorize;
use phonebook::api::{CmdMessage, MessageLevel};
use phonebook::config::{PhonebookConfig, CONFIG_KEYS};
use phonebook::model::Contact;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const NAME_MAX_WIDTH: usize = 30;
const PHONE_MAX_WIDTH: usize = 22;
const NOTE_MIN_WIDTH: usize = 10;
const SEPARATOR: &str = " │ ";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_error(err: &phonebook::error::PhonebookError) {
    println!("{} {}", "Error:".red(), err);
}

pub(super) fn print_config(config: &PhonebookConfig) {
    for key in CONFIG_KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

/// Prints contacts as an aligned table. Prints nothing for an empty slice.
pub(super) fn print_contacts(contacts: &[Contact]) {
    if contacts.is_empty() {
        return;
    }

    let ids: Vec<String> = contacts.iter().map(id_label).collect();
    let id_width = column_width(ids.iter().map(String::as_str), "ID", usize::MAX);
    let name_width = column_width(contacts.iter().map(Contact::name), "Name", NAME_MAX_WIDTH);
    let phone_width = column_width(contacts.iter().map(Contact::phone), "Phone", PHONE_MAX_WIDTH);
    let fixed = id_width + name_width + phone_width + 3 * SEPARATOR.width();
    let note_width = LINE_WIDTH.saturating_sub(fixed).max(NOTE_MIN_WIDTH);

    let header = [
        pad_to_width("ID", id_width),
        pad_to_width("Name", name_width),
        pad_to_width("Phone", phone_width),
        "Note".to_string(),
    ]
    .join(SEPARATOR);
    println!("{}", header.bold());
    println!("{}", "─".repeat(fixed + "Note".len()).dimmed());

    for (contact, id) in contacts.iter().zip(&ids) {
        println!(
            "{}{}{}{}{}{}{}",
            pad_to_width(id, id_width).yellow(),
            SEPARATOR,
            pad_to_width(contact.name(), name_width),
            SEPARATOR,
            pad_to_width(contact.phone(), phone_width),
            SEPARATOR,
            truncate_to_width(&single_line(contact.note()), note_width).dimmed()
        );
    }
}

fn id_label(contact: &Contact) -> String {
    contact
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, header: &str, max: usize) -> usize {
    cells
        .map(|c| c.width())
        .chain(std::iter::once(header.width()))
        .max()
        .unwrap_or(0)
        .min(max)
}

fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let cell = truncate_to_width(&single_line(s), width);
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}

/// Cuts `s` to at most `max_width` columns, marking the cut with `…`.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_kept() {
        assert_eq!(truncate_to_width("Ivan", 4), "Ivan");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        let cut = truncate_to_width("Konstantin Konstantinopolsky", 10);
        assert_eq!(cut, "Konstanti…");
        assert_eq!(cut.width(), 10);
    }

    #[test]
    fn wide_chars_counted_by_columns() {
        let cut = truncate_to_width("電話番号帳", 5);
        assert!(cut.width() <= 5);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn padding_reaches_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("line\nbreak", 10), "line break");
    }
}
