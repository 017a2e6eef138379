// File: ./src/error.rs
//! Error taxonomy shared by the parser, the task list and the storage layer.
//!
//! Three families exist and none of them is fatal:
//! - [`InputError`]: the command text itself is malformed.
//! - [`ValidationError`]: the command is well formed but cannot be applied.
//! - [`PersistenceError`]: the data file could not be read, decoded or written.
//!
//! Only the front end matches on the family to decide how to present it.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Input command cannot be empty.")]
    Empty,

    #[error("Unknown command '{0}'. Type 'help' to see what I understand.")]
    UnknownCommand(String),

    #[error("'{command}' takes no extra arguments, got: {extra}")]
    ExtraArguments { command: String, extra: String },

    #[error("Oops! The description of a {kind} cannot be empty.")]
    EmptyDescription { kind: &'static str },

    #[error("The description cannot contain the reserved character '|'.")]
    ReservedCharacter,

    #[error("Missing {flag}: specify one by appending '{flag} <date time>'.")]
    MissingFlag { flag: &'static str },

    #[error("Multiple {flag} flags given; use exactly one.")]
    MultipleFlag { flag: &'static str },

    #[error("Flags out of order: {first} must come before {second}.")]
    FlagsOutOfOrder {
        first: &'static str,
        second: &'static str,
    },

    #[error("Empty date after {flag}: specify one as '{flag} <date time>'.")]
    EmptyDate { flag: &'static str },

    #[error("Invalid date/time '{value}'. Use {example}.")]
    InvalidDateTime { value: String, example: String },

    #[error("Event's end must be after its start (end cannot be before or equal to start).")]
    EndBeforeStart,

    #[error("You must specify at least one task number.")]
    MissingIndex,

    #[error("Task numbers must be integers, got '{0}'.")]
    NotAnInteger(String),

    #[error("Task number {0} is too large.")]
    IndexTooLarge(String),

    #[error("Task numbers must be positive (non-positive number {0}).")]
    NonPositive(i64),

    #[error("Task number {0} was given more than once (duplicate index).")]
    DuplicateIndex(usize),

    #[error("Search keyword cannot be empty (empty keyword).")]
    EmptyKeyword,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task number {number} is out of range: the list has {size} task(s).")]
    OutOfRange { number: usize, size: usize },

    #[error("Internal index {index} is out of range for a list of {size} task(s).")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Task number {0} was given more than once (duplicate index).")]
    DuplicateIndex(usize),

    #[error("That task is already in the list (duplicate task).")]
    DuplicateTask,

    #[error("An event's end must be after its start.")]
    EndNotAfterStart,

    #[error("A task description cannot be empty.")]
    EmptyDescription,
}

/// Why a single stored line could not be turned back into a task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("bad done flag '{0}'")]
    BadDoneFlag(String),

    #[error("corrupted date/time '{0}'")]
    CorruptedDateTime(String),

    #[error("empty description")]
    EmptyDescription,
}

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Corrupted line {line_no} in data file ('{line}'): {kind}")]
    CorruptedLine {
        line_no: usize,
        line: String,
        kind: DecodeError,
    },

    #[error("Failed to read '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save tasks to '{}' (write failed): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot save task: {0}")]
    Unencodable(String),
}

impl PersistenceError {
    /// The decode failure behind a corrupted line, if that is what this is.
    pub fn decode_kind(&self) -> Option<&DecodeError> {
        match self {
            PersistenceError::CorruptedLine { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, Error>;
