use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("No command given")]
    Empty,
    #[error("Unknown command \"{0}\"")]
    UnknownCommand(String),
    #[error("Expected 2 coordinates but got {0}")]
    WrongArgCount(usize),
    #[error("Could not parse coordinate \"{0}\" as a non-negative integer")]
    InvalidCoordinate(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    // x is the column and y the row, both 0-based
    Place { x: usize, y: usize },
    Reset,
    Quit,
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let first = *words.first().ok_or(InputError::Empty)?;
        match first.to_ascii_lowercase().as_str() {
            "reset" | "restart" if words.len() == 1 => return Ok(Command::Reset),
            "quit" | "exit" if words.len() == 1 => return Ok(Command::Quit),
            _ => {}
        }
        if !first.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(InputError::UnknownCommand(line.trim().to_string()));
        }
        if words.len() != 2 {
            return Err(InputError::WrongArgCount(words.len()));
        }
        Ok(Command::Place {
            x: parse_coordinate(words[0])?,
            y: parse_coordinate(words[1])?,
        })
    }
}

fn parse_coordinate(word: &str) -> Result<usize, InputError> {
    word.parse()
        .map_err(|_| InputError::InvalidCoordinate(word.to_string()))
}
