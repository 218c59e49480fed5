//! Interactive menu. Runs when no subcommand is given.

use super::print::{print_contacts, print_error, print_messages};
use super::AppContext;
use colored::Colorize;
use console::{Key, Term};
use log::debug;
use phonebook::error::Result;
use phonebook::model::{ContactId, SearchField};
use phonebook::store::ContactUpdate;
use phonebook::validation::require_field;
use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use unicode_width::UnicodeWidthChar;

const MENU: [&str; 8] = [
    "Open file",
    "Save file",
    "Show all contacts",
    "Create contact",
    "Find contact",
    "Edit contact",
    "Delete contact",
    "Exit",
];

const YES_ANSWERS: [&str; 4] = ["y", "yes", "да", "д"];

enum Step {
    Continue,
    Exit,
    InputClosed,
}

/// How a read ended.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    Closed,
    Interrupted,
}

/// What one key press does to the line being typed.
#[derive(Debug, PartialEq, Eq)]
enum KeyEffect {
    Typed(char),
    Erased(char),
    Ignored,
    Done(Input),
}

fn apply_key(line: &mut String, key: Key) -> KeyEffect {
    match key {
        Key::Enter => KeyEffect::Done(Input::Line(std::mem::take(line))),
        Key::CtrlC => KeyEffect::Done(Input::Interrupted),
        // Ctrl-D on an empty line, as in a cooked terminal.
        Key::Char('\x04') if line.is_empty() => KeyEffect::Done(Input::Closed),
        Key::Backspace => line.pop().map_or(KeyEffect::Ignored, KeyEffect::Erased),
        Key::Char(c) if !c.is_control() => {
            line.push(c);
            KeyEffect::Typed(c)
        }
        _ => KeyEffect::Ignored,
    }
}

struct Prompt {
    term: Term,
    interrupted: Cell<bool>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            term: Term::stdout(),
            interrupted: Cell::new(false),
        }
    }

    /// Reads one trimmed line. `None` means input is gone (EOF, Ctrl-C, broken tty);
    /// [`Prompt::take_interrupt`] tells Ctrl-C apart.
    fn ask(&self, label: &str) -> Option<String> {
        match self.read(label) {
            Ok(Input::Line(line)) => Some(line.trim().to_string()),
            Ok(Input::Closed) => None,
            Ok(Input::Interrupted) => {
                self.interrupted.set(true);
                None
            }
            Err(err) => {
                debug!("input error: {}", err);
                None
            }
        }
    }

    fn take_interrupt(&self) -> bool {
        self.interrupted.replace(false)
    }

    fn read(&self, label: &str) -> io::Result<Input> {
        self.term.write_str(&format!("{}: ", label))?;
        self.term.flush()?;

        if self.term.is_term() {
            return self.read_keys();
        }
        // Piped input: a zero-byte read is the only way to tell EOF from an empty line.
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(Input::Closed);
        }
        Ok(Input::Line(line))
    }

    /// Line editing on a tty. Raw keys keep Ctrl-C from raising SIGINT.
    fn read_keys(&self) -> io::Result<Input> {
        let mut line = String::new();
        loop {
            match apply_key(&mut line, self.term.read_key_raw()?) {
                KeyEffect::Typed(c) => self.term.write_str(c.encode_utf8(&mut [0; 4]))?,
                KeyEffect::Erased(c) => self.term.clear_chars(c.width().unwrap_or(1))?,
                KeyEffect::Ignored => continue,
                KeyEffect::Done(input) => {
                    if input == Input::Interrupted {
                        self.term.write_str("^C")?;
                    }
                    self.term.write_line("")?;
                    return Ok(input);
                }
            }
            self.term.flush()?;
        }
    }

    fn confirm(&self, label: &str) -> Option<bool> {
        self.ask(&format!("{} (y/n)", label))
            .map(|answer| YES_ANSWERS.contains(&answer.to_lowercase().as_str()))
    }
}

pub(super) fn run(ctx: &mut AppContext) -> Result<()> {
    let prompt = Prompt::new();
    println!("{}", "Welcome to the phonebook!".bold());

    match ctx.api.open(ctx.file.clone()) {
        Ok(result) => print_messages(&result.messages),
        Err(err) => print_error(&err),
    }

    loop {
        print_menu(ctx);
        let step = match prompt.ask("Choose an action (1-8)") {
            None => Ok(Step::InputClosed),
            Some(choice) => match choice.as_str() {
                "1" => open_file(ctx, &prompt),
                "2" => ctx.api.save().map(|result| {
                    print_messages(&result.messages);
                    Step::Continue
                }),
                "3" => {
                    show_all(ctx);
                    Ok(Step::Continue)
                }
                "4" => create_contact(ctx, &prompt),
                "5" => find_contacts(ctx, &prompt),
                "6" => edit_contact(ctx, &prompt),
                "7" => delete_contact(ctx, &prompt),
                "8" | "q" | "quit" | "exit" => exit(ctx, &prompt),
                _ => {
                    println!("{}", "Invalid choice. Please pick 1 to 8.".yellow());
                    Ok(Step::Continue)
                }
            },
        };

        let step = match step {
            // Ctrl-C anywhere leaves through the same save prompt as "Exit".
            Ok(Step::InputClosed) if prompt.take_interrupt() => {
                println!("{}", "Interrupted.".dimmed());
                exit(ctx, &prompt)
            }
            other => other,
        };

        match step {
            Ok(Step::Continue) => {}
            Ok(Step::Exit) => {
                println!("Goodbye!");
                return Ok(());
            }
            Ok(Step::InputClosed) => {
                input_closed(ctx);
                return Ok(());
            }
            Err(err) => print_error(&err),
        }
    }
}

fn print_menu(ctx: &AppContext) {
    println!();
    let marker = if ctx.api.has_unsaved_changes() { " *" } else { "" };
    println!(
        "{}{}",
        format!("PHONEBOOK: {}", ctx.api.path().display()).bold(),
        marker.yellow()
    );
    for (i, item) in MENU.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}

fn input_closed(ctx: &AppContext) {
    println!();
    println!("{}", "Input closed.".dimmed());
    if ctx.api.has_unsaved_changes() {
        println!("{}", "Warning: unsaved changes were not saved!".yellow());
    }
}

fn open_file(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    if ctx.api.has_unsaved_changes() {
        match prompt.confirm("You have unsaved changes. Discard them?") {
            None => return Ok(Step::InputClosed),
            Some(false) => return Ok(Step::Continue),
            Some(true) => {}
        }
    }
    let Some(answer) = prompt.ask(&format!("File to open [{}]", ctx.api.path().display())) else {
        return Ok(Step::InputClosed);
    };
    let path = if answer.is_empty() {
        ctx.api.path().to_path_buf()
    } else {
        PathBuf::from(answer)
    };

    let result = ctx.api.open(path)?;
    print_messages(&result.messages);
    Ok(Step::Continue)
}

fn show_all(ctx: &AppContext) {
    let result = ctx.api.list();
    print_contacts(&result.listed_contacts);
    print_messages(&result.messages);
}

fn create_contact(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    let Some(name) = prompt.ask("Name") else {
        return Ok(Step::InputClosed);
    };
    // Check before asking for the rest.
    require_field("name", &name)?;
    let Some(phone) = prompt.ask("Phone") else {
        return Ok(Step::InputClosed);
    };
    require_field("phone", &phone)?;
    let Some(note) = prompt.ask("Note (optional)") else {
        return Ok(Step::InputClosed);
    };

    let result = ctx.api.create(&name, &phone, &note)?;
    print_messages(&result.messages);
    Ok(Step::Continue)
}

fn find_contacts(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    if ctx.api.is_empty() {
        println!("{}", "The phonebook is empty.".dimmed());
        return Ok(Step::Continue);
    }

    println!("  1. By name\n  2. By phone\n  3. By note\n  4. All fields");
    let Some(choice) = prompt.ask("Search in (1-4)") else {
        return Ok(Step::InputClosed);
    };
    let field = match choice.as_str() {
        "1" => SearchField::Name,
        "2" => SearchField::Phone,
        "3" => SearchField::Note,
        "4" => SearchField::All,
        _ => {
            println!("{}", "Invalid choice, searching all fields.".yellow());
            SearchField::All
        }
    };
    let Some(term) = prompt.ask("Search for") else {
        return Ok(Step::InputClosed);
    };

    let result = ctx.api.search(&term, field)?;
    print_contacts(&result.listed_contacts);
    print_messages(&result.messages);
    Ok(Step::Continue)
}

/// Asks for an id and prints the contact. `None` means input is gone,
/// `Some(None)` means there is nothing to act on.
fn pick_contact(ctx: &AppContext, prompt: &Prompt, action: &str) -> Option<Option<ContactId>> {
    let answer = prompt.ask(&format!("ID of the contact to {}", action))?;
    let Ok(id) = answer.parse::<ContactId>() else {
        println!("{}", "ID must be a number.".red());
        return Some(None);
    };
    match ctx.api.show(id) {
        Ok(result) => {
            print_contacts(&result.listed_contacts);
            Some(Some(id))
        }
        Err(err) => {
            print_error(&err);
            Some(None)
        }
    }
}

fn edit_contact(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    let Some(picked) = pick_contact(ctx, prompt, "edit") else {
        return Ok(Step::InputClosed);
    };
    let Some(id) = picked else {
        return Ok(Step::Continue);
    };
    let Some(current) = ctx.api.find(id).cloned() else {
        return Ok(Step::Continue);
    };

    println!("{}", "Enter new values (leave empty to keep the current one):".dimmed());
    let mut update = ContactUpdate::new();
    for (label, value, slot) in [
        ("Name", current.name(), &mut update.name),
        ("Phone", current.phone(), &mut update.phone),
        ("Note", current.note(), &mut update.note),
    ] {
        let Some(answer) = prompt.ask(&format!("{} [{}]", label, value)) else {
            return Ok(Step::InputClosed);
        };
        if !answer.is_empty() {
            *slot = Some(answer);
        }
    }

    let result = ctx.api.update(id, &update)?;
    print_messages(&result.messages);
    Ok(Step::Continue)
}

fn delete_contact(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    let Some(picked) = pick_contact(ctx, prompt, "delete") else {
        return Ok(Step::InputClosed);
    };
    let Some(id) = picked else {
        return Ok(Step::Continue);
    };

    if ctx.config.confirm_delete {
        match prompt.confirm("Are you sure?") {
            None => return Ok(Step::InputClosed),
            Some(false) => {
                println!("{}", "Deletion cancelled.".dimmed());
                return Ok(Step::Continue);
            }
            Some(true) => {}
        }
    }

    let result = ctx.api.delete(id)?;
    print_messages(&result.messages);
    Ok(Step::Continue)
}

fn exit(ctx: &mut AppContext, prompt: &Prompt) -> Result<Step> {
    if !ctx.api.has_unsaved_changes() {
        return Ok(Step::Exit);
    }
    match prompt.confirm("You have unsaved changes. Save them?") {
        None => Ok(Step::InputClosed),
        Some(false) => Ok(Step::Exit),
        Some(true) => {
            let result = ctx.api.save()?;
            print_messages(&result.messages);
            Ok(Step::Exit)
        }
    }
}
