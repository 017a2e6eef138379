// File: src/model/parser.rs
//! Command grammar.
//!
//! ```text
//! list | help | bye
//! todo <description>
//! deadline <description> /by <date time>
//! event <description> /from <date time> /to <date time>
//! mark | unmark | delete <n> [<n> ...]
//! find <keyword>
//! ```
//!
//! Parsing is pure: the same line always yields the same result. Task
//! numbers are checked for shape only; whether they exist in the list is
//! decided by `TaskList` when the command is applied.
use crate::config::DateTimeFormat;
use crate::error::InputError;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};

pub const FLAG_BY: &str = "/by";
pub const FLAG_FROM: &str = "/from";
pub const FLAG_TO: &str = "/to";

/// Reserved by the storage line format.
pub const RESERVED_CHAR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandWord {
    List,
    Help,
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    Find,
    Bye,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    List,
    Help,
    AddPlain {
        description: String,
    },
    AddDeadline {
        description: String,
        due: NaiveDateTime,
    },
    AddInterval {
        description: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    /// Indices are 1-based, de-duplicated and in the order the user typed them.
    Mark {
        indices: Vec<usize>,
    },
    Unmark {
        indices: Vec<usize>,
    },
    Delete {
        indices: Vec<usize>,
    },
    Find {
        keyword: String,
    },
    Bye,
}

impl ParsedCommand {
    /// Whether applying this command changes the task list.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            ParsedCommand::List
                | ParsedCommand::Help
                | ParsedCommand::Find { .. }
                | ParsedCommand::Bye
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    format: DateTimeFormat,
}

impl CommandParser {
    pub fn new(format: DateTimeFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &DateTimeFormat {
        &self.format
    }

    pub fn parse(&self, line: &str) -> Result<ParsedCommand, InputError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }

        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (trimmed, ""),
        };

        let command = CommandWord::from_str(word)
            .map_err(|_| InputError::UnknownCommand(word.to_lowercase()))?;

        match command {
            CommandWord::List => no_arguments(command, rest).map(|_| ParsedCommand::List),
            CommandWord::Help => no_arguments(command, rest).map(|_| ParsedCommand::Help),
            CommandWord::Bye => no_arguments(command, rest).map(|_| ParsedCommand::Bye),
            CommandWord::Todo => {
                let description = description_of(rest, "ToDo")?;
                Ok(ParsedCommand::AddPlain { description })
            }
            CommandWord::Deadline => self.parse_deadline(rest),
            CommandWord::Event => self.parse_event(rest),
            CommandWord::Mark => parse_indices(rest).map(|indices| ParsedCommand::Mark { indices }),
            CommandWord::Unmark => {
                parse_indices(rest).map(|indices| ParsedCommand::Unmark { indices })
            }
            CommandWord::Delete => {
                parse_indices(rest).map(|indices| ParsedCommand::Delete { indices })
            }
            CommandWord::Find => {
                if rest.is_empty() {
                    return Err(InputError::EmptyKeyword);
                }
                Ok(ParsedCommand::Find {
                    keyword: rest.to_string(),
                })
            }
        }
    }

    fn parse_deadline(&self, rest: &str) -> Result<ParsedCommand, InputError> {
        if rest.is_empty() {
            return Err(InputError::EmptyDescription { kind: "Deadline" });
        }
        let by = single_flag(rest, FLAG_BY)?;

        let description = description_of(&rest[..by], "Deadline")?;
        let when = rest[by + FLAG_BY.len()..].trim();
        if when.is_empty() {
            return Err(InputError::EmptyDate { flag: FLAG_BY });
        }

        let due = self.parse_datetime(when)?;
        Ok(ParsedCommand::AddDeadline { description, due })
    }

    fn parse_event(&self, rest: &str) -> Result<ParsedCommand, InputError> {
        if rest.is_empty() {
            return Err(InputError::EmptyDescription { kind: "Event" });
        }
        let from = single_flag(rest, FLAG_FROM)?;
        let to = single_flag(rest, FLAG_TO)?;
        if to < from {
            return Err(InputError::FlagsOutOfOrder {
                first: FLAG_FROM,
                second: FLAG_TO,
            });
        }

        let description = description_of(&rest[..from], "Event")?;
        let start_str = rest[from + FLAG_FROM.len()..to].trim();
        let end_str = rest[to + FLAG_TO.len()..].trim();
        if start_str.is_empty() {
            return Err(InputError::EmptyDate { flag: FLAG_FROM });
        }
        if end_str.is_empty() {
            return Err(InputError::EmptyDate { flag: FLAG_TO });
        }

        let start = self.parse_datetime(start_str)?;
        let end = self.parse_datetime(end_str)?;
        if end <= start {
            return Err(InputError::EndBeforeStart);
        }

        Ok(ParsedCommand::AddInterval {
            description,
            start,
            end,
        })
    }

    fn parse_datetime(&self, value: &str) -> Result<NaiveDateTime, InputError> {
        self.format
            .parse_strict(value)
            .ok_or_else(|| InputError::InvalidDateTime {
                value: value.to_string(),
                example: self.format.example(),
            })
    }
}

fn no_arguments(command: CommandWord, rest: &str) -> Result<(), InputError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(InputError::ExtraArguments {
            command: command.as_ref().to_string(),
            extra: rest.to_string(),
        })
    }
}

fn description_of(text: &str, kind: &'static str) -> Result<String, InputError> {
    let description = text.trim();
    if description.is_empty() {
        return Err(InputError::EmptyDescription { kind });
    }
    if description.contains(RESERVED_CHAR) {
        return Err(InputError::ReservedCharacter);
    }
    Ok(description.to_string())
}

/// Byte offsets of `flag` where it stands as its own whitespace-delimited token.
fn flag_positions(text: &str, flag: &str) -> Vec<usize> {
    text.match_indices(flag)
        .map(|(pos, _)| pos)
        .filter(|&pos| {
            let before_ok = text[..pos]
                .chars()
                .next_back()
                .is_none_or(char::is_whitespace);
            let after_ok = text[pos + flag.len()..]
                .chars()
                .next()
                .is_none_or(char::is_whitespace);
            before_ok && after_ok
        })
        .collect()
}

fn single_flag(text: &str, flag: &'static str) -> Result<usize, InputError> {
    match flag_positions(text, flag).as_slice() {
        [] => Err(InputError::MissingFlag { flag }),
        [pos] => Ok(*pos),
        _ => Err(InputError::MultipleFlag { flag }),
    }
}

fn parse_indices(rest: &str) -> Result<Vec<usize>, InputError> {
    let mut seen = HashSet::new();
    let mut indices = Vec::new();

    for token in rest.split_whitespace() {
        let n: i64 = token.parse().map_err(|e: ParseIntError| match e.kind() {
            IntErrorKind::PosOverflow => InputError::IndexTooLarge(token.to_string()),
            IntErrorKind::NegOverflow => InputError::NonPositive(i64::MIN),
            _ => InputError::NotAnInteger(token.to_string()),
        })?;
        if n <= 0 {
            return Err(InputError::NonPositive(n));
        }
        let n = usize::try_from(n).map_err(|_| InputError::IndexTooLarge(token.to_string()))?;
        if !seen.insert(n) {
            return Err(InputError::DuplicateIndex(n));
        }
        indices.push(n);
    }

    if indices.is_empty() {
        return Err(InputError::MissingIndex);
    }
    Ok(indices)
}
