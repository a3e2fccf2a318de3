use thiserror::Error;

use crate::{models::BoardSize, utils::letters::normalize};

/// A single key press in the word box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Deal a new board, optionally with a new size
    NewGame(Option<BoardSize>),
    /// Print the game as JSON
    State,
    Help,
    Quit,
}

/// What one line of terminal input means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Keys(Vec<Key>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown command :{0} (try :help)")]
    UnknownCommand(String),
    #[error("usage: :new [sides letters-per-side]")]
    BadNewGame,
    #[error(transparent)]
    Board(#[from] crate::models::BoardError),
}

pub const BACKSPACE_KEY: char = '<';

pub const HELP: &str = "\
Type a word and press Enter to submit it. Each letter must come from a
different side than the one before it, and every word must start with the
last letter of the previous word. Use every letter on the board to win.

  <           backspace (at the start of a word, takes back the last word)
  (blank)     submit the current word
  :new [S L]  new game, optionally with S sides of L letters
  :state      print the game as JSON
  :help       show this help
  :quit       leave";

/// Parse a line of input.
///
/// In a key line letters are typed, `<` is Backspace and anything else is
/// ignored. The end of the line counts as Enter unless the line ends with a
/// backspace, so `ABD` types and submits a word while `AB<` only edits.
pub fn parse_line(line: &str) -> Result<Input, InputError> {
    let line = line.trim();

    if let Some(command) = line.strip_prefix(':') {
        return parse_command(command).map(Input::Command);
    }

    let mut keys: Vec<Key> = line
        .chars()
        .filter_map(|ch| match ch {
            BACKSPACE_KEY => Some(Key::Backspace),
            _ => normalize(ch).map(Key::Letter),
        })
        .collect();

    if keys.last() != Some(&Key::Backspace) {
        keys.push(Key::Enter);
    }

    Ok(Input::Keys(keys))
}

fn parse_command(command: &str) -> Result<Command, InputError> {
    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();

    match name.as_str() {
        "new" | "n" => {
            let args: Vec<&str> = parts.collect();
            match args.as_slice() {
                [] => Ok(Command::NewGame(None)),
                [sides, letters] => {
                    let sides = sides.parse().map_err(|_| InputError::BadNewGame)?;
                    let letters = letters.parse().map_err(|_| InputError::BadNewGame)?;
                    Ok(Command::NewGame(Some(BoardSize::new(sides, letters)?)))
                }
                _ => Err(InputError::BadNewGame),
            }
        }
        "state" | "s" => Ok(Command::State),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}
