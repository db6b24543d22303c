//! # Input Module
//!
//! Tokenizes player input into game commands.
//!
//! The first word of a line, case-insensitively, selects the command; for
//! the file commands the trimmed remainder of the line is the file name.
//! Anything that is not a known keyword is treated as a direction token.

use crate::Direction;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move through the exit in the given direction
    Move(Direction),
    /// Search the current location's hiding place
    Check,
    /// Jump to a random hiding spot
    Teleport,
    /// Save the session under the given file name
    Save(String),
    /// Load the session saved under the given file name
    Load(String),
    /// Delete the saved game with the given file name
    Delete(String),
}

/// Parses one line of player input.
///
/// Returns `None` when the first token is neither a keyword nor a valid
/// direction.
///
/// # Examples
///
/// ```
/// use hideseek::{parse_command, Command, Direction};
///
/// assert_eq!(parse_command("ne"), Some(Command::Move(Direction::Northeast)));
/// assert_eq!(parse_command("CHECK"), Some(Command::Check));
/// assert_eq!(
///     parse_command("save my_game"),
///     Some(Command::Save("my_game".to_string()))
/// );
/// assert_eq!(parse_command("fly"), None);
/// ```
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    let (first, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first, rest),
        None => (trimmed, ""),
    };
    let file_name = || rest.trim().to_string();

    match first.to_lowercase().as_str() {
        "check" => Some(Command::Check),
        "teleport" => Some(Command::Teleport),
        "save" => Some(Command::Save(file_name())),
        "load" => Some(Command::Load(file_name())),
        "delete" => Some(Command::Delete(file_name())),
        _ => Direction::from_token(first).map(Command::Move),
    }
}
