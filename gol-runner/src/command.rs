//! Commands accepted by the interactive loop.

use std::path::PathBuf;

use thiserror::Error;

pub const HELP: &str = "\
Simple implementation of Conway's game of life.

Universe input file format:
  1. #N <name>
  2. #R #B<x>/S<y> - birth and survival rules, x and y are digits from 0..8
  3. #S <width> <height>
  4. Cell coordinates: <x> <y>, one per line, within width and height

Commands:
  help          - show this reference
  dump <file>   - save the current universe state
  tick [n]      - advance n generations (default 1), Ctrl+C interrupts
  exit          - end the game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tick(u64),
    Dump(PathBuf),
    Help,
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command! {0:?}")]
    Unknown(String),

    #[error("`{command}` needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid number of generations {0:?}")]
    InvalidCount(String),

    #[error("`{command}` takes no argument, got {argument:?}")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "tick" => match rest {
                "" => Command::Tick(1),
                count => Command::Tick(
                    count
                        .parse()
                        .map_err(|_| CommandError::InvalidCount(count.to_string()))?,
                ),
            },
            "dump" => match rest {
                "" => {
                    return Err(CommandError::MissingArgument {
                        command: "dump",
                        argument: "a file name",
                    })
                }
                path => Command::Dump(PathBuf::from(path)),
            },
            "help" => no_argument("help", rest, Command::Help)?,
            "exit" | "quit" => no_argument("exit", rest, Command::Exit)?,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn no_argument(
    command: &'static str,
    rest: &str,
    parsed: Command,
) -> Result<Command, CommandError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(CommandError::UnexpectedArgument {
            command,
            argument: rest.to_string(),
        })
    }
}
