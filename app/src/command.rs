//! Line commands understood by the terminal front end.
//!
//! Items are addressed by their 1-based position in the last rendered list,
//! the way a click addresses the row under the pointer.

use thiserror::Error;
use todo_core::{Todo, TodoState};

pub const HELP: &str = "\
commands:
  title <text>        set the title input
  desc <text>         set the description input (empty to clear)
  add [title]         submit the form (optionally setting the title first)
  toggle <n>          flip completion of item n
  rm <n>              delete item n
  show                redraw
  help                this text
  quit                exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Title(String),
    Description(String),
    Add(Option<String>),
    Toggle(usize),
    Remove(usize),
    Show,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not an item number")]
    BadIndex(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line.trim_end(), ""),
    };

    match word {
        "" | "show" | "ls" => Ok(Command::Show),
        "title" => Ok(Command::Title(rest.to_string())),
        "desc" | "description" => Ok(Command::Description(rest.to_string())),
        "add" => Ok(Command::Add((!rest.is_empty()).then(|| rest.to_string()))),
        "toggle" | "t" => index("toggle", rest).map(Command::Toggle),
        "rm" | "delete" => index("rm", rest).map(Command::Remove),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn index(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingIndex(command));
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadIndex(raw.to_string())),
    }
}

/// The item shown at 1-based position `n`, as currently cached.
pub fn resolve(state: &TodoState, n: usize) -> Option<Todo> {
    n.checked_sub(1).and_then(|i| state.todos.get(i)).cloned()
}
