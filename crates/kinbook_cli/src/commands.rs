//! Command parsing and dispatch for the interactive shell.
//!
//! # Responsibility
//! - Tokenize user input into a command word plus arguments.
//! - Map each command onto one use-case call and render the result line.
//!
//! # Invariants
//! - Dispatch never panics on malformed input; bad arity and domain errors
//!   come back as plain message lines.
//! - Mutating commands persist the book eagerly after success.

use chrono::NaiveDate;
use kinbook_core::{AddContactOutcome, BookRepository, BookService};
use log::warn;

/// Parsed shell input: lower-cased command word plus raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub command: String,
    pub args: Vec<String>,
}

/// What the shell loop should do after a dispatched command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Splits `line` on whitespace into a command and arguments.
///
/// Returns `None` for blank input. The command word is lower-cased; argument
/// casing is preserved (names are case-sensitive keys).
pub fn parse_line(line: &str) -> Option<CommandLine> {
    let mut parts = line.split_whitespace();
    let command = parts.next()?.to_ascii_lowercase();
    let args = parts.map(str::to_string).collect();
    Some(CommandLine { command, args })
}

/// Executes one parsed command against the service.
///
/// Returns the message to print and whether the loop should keep running.
/// `today` is passed in so the birthday report stays deterministic in tests.
pub fn dispatch<R: BookRepository>(
    line: &CommandLine,
    service: &mut BookService<R>,
    today: NaiveDate,
) -> (String, Flow) {
    match line.command.as_str() {
        "hello" => ("How can I help you?".to_string(), Flow::Continue),
        "add" => (add_contact(&line.args, service), Flow::Continue),
        "change" => (change_phone(&line.args, service), Flow::Continue),
        "phone" => (show_phone(&line.args, service), Flow::Continue),
        "all" => (service.book().to_string(), Flow::Continue),
        "add-birthday" => (add_birthday(&line.args, service), Flow::Continue),
        "show-birthday" => (show_birthday(&line.args, service), Flow::Continue),
        "birthdays" => (render_birthdays(service, today), Flow::Continue),
        "close" | "exit" => ("Good bye!".to_string(), Flow::Exit),
        _ => ("Invalid command.".to_string(), Flow::Continue),
    }
}

fn add_contact<R: BookRepository>(args: &[String], service: &mut BookService<R>) -> String {
    let [name, phone] = args else {
        return "Give me name and phone please.".to_string();
    };
    match service.add_contact(name, phone) {
        Ok(AddContactOutcome::Created) => persist_after(service, "Contact added."),
        Ok(AddContactOutcome::Updated) => persist_after(service, "Contact updated."),
        Err(err) => err.to_string(),
    }
}

fn change_phone<R: BookRepository>(args: &[String], service: &mut BookService<R>) -> String {
    let [name, old, new] = args else {
        return "Give me name, old phone and new phone please.".to_string();
    };
    match service.change_phone(name, old, new) {
        Ok(()) => persist_after(service, "Contact updated."),
        Err(err) => err.to_string(),
    }
}

fn show_phone<R: BookRepository>(args: &[String], service: &BookService<R>) -> String {
    let [name] = args else {
        return "Give me a contact name please.".to_string();
    };
    match service.contact(name) {
        Ok(record) => record.to_string(),
        Err(err) => err.to_string(),
    }
}

fn add_birthday<R: BookRepository>(args: &[String], service: &mut BookService<R>) -> String {
    let [name, birthday] = args else {
        return "Give me name and birthday please.".to_string();
    };
    match service.set_birthday(name, birthday) {
        Ok(()) => persist_after(service, &format!("Birthday added for {name}.")),
        Err(err) => err.to_string(),
    }
}

fn show_birthday<R: BookRepository>(args: &[String], service: &BookService<R>) -> String {
    let [name] = args else {
        return "Give me a contact name please.".to_string();
    };
    match service.birthday_of(name) {
        Ok(Some(birthday)) => format!("{name}'s birthday: {birthday}"),
        Ok(None) => format!("No birthday recorded for {name}."),
        Err(err) => err.to_string(),
    }
}

fn render_birthdays<R: BookRepository>(service: &BookService<R>, today: NaiveDate) -> String {
    let upcoming = service.upcoming_birthdays(today);
    if upcoming.is_empty() {
        return "No upcoming birthdays in the next 7 days.".to_string();
    }

    let mut lines = vec!["Upcoming birthdays:".to_string()];
    for entry in &upcoming {
        lines.push(format!(
            "{}: {}",
            entry.name,
            entry.congratulation_date_string()
        ));
    }
    lines.join("\n")
}

/// Persists the book after a successful mutation.
///
/// A failed save does not undo the in-memory change; the shell reports it
/// and the regular save-on-exit gets another chance.
fn persist_after<R: BookRepository>(service: &BookService<R>, message: &str) -> String {
    match service.persist() {
        Ok(()) => message.to_string(),
        Err(err) => {
            warn!("event=book_persist module=cli status=error error={err}");
            format!("{message} Warning: could not save the address book: {err}")
        }
    }
}
