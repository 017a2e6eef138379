// File: ./src/model/adapter.rs
// Converts tasks to and from the line-oriented data file format:
//
//   T | <0|1> | <description>
//   D | <0|1> | <description> | <due>
//   E | <0|1> | <description> | <start> | <end>
//
// Dates use the same strict pattern as command input.
use crate::config::DateTimeFormat;
use crate::error::{DecodeError, PersistenceError};
use crate::model::item::{Task, TaskKind, TaskType};
use crate::model::parser::RESERVED_CHAR;
use chrono::NaiveDateTime;

pub const FIELD_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Default)]
pub struct LineCodec {
    format: DateTimeFormat,
}

impl LineCodec {
    pub fn new(format: DateTimeFormat) -> Self {
        Self { format }
    }

    /// Fails only for descriptions containing the field delimiter, which
    /// could not be decoded back unambiguously.
    pub fn encode(&self, task: &Task) -> Result<String, PersistenceError> {
        if task.description().contains(RESERVED_CHAR) {
            return Err(PersistenceError::Unencodable(task.description().to_string()));
        }
        let done = if task.is_done() { "1" } else { "0" };
        let code = task.task_type().code().to_string();
        let dates: Vec<String> = match task.kind() {
            TaskKind::Plain => vec![],
            TaskKind::Deadline { due } => vec![self.format.format_input(due)],
            TaskKind::Interval { start, end } => vec![
                self.format.format_input(start),
                self.format.format_input(end),
            ],
        };

        let mut fields = vec![code.as_str(), done, task.description()];
        fields.extend(dates.iter().map(String::as_str));
        Ok(fields.join(FIELD_SEPARATOR))
    }

    pub fn decode(&self, line: &str) -> Result<Task, DecodeError> {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 3 {
            return Err(DecodeError::FieldCount {
                expected: "at least 3",
                found: parts.len(),
            });
        }

        let task_type = TaskType::from_code(parts[0])
            .ok_or_else(|| DecodeError::UnknownType(parts[0].to_string()))?;

        let done = match parts[1] {
            "1" => true,
            "0" => false,
            other => return Err(DecodeError::BadDoneFlag(other.to_string())),
        };

        let description = parts[2];
        if description.is_empty() {
            return Err(DecodeError::EmptyDescription);
        }

        let (expected, arity) = match task_type {
            TaskType::Plain => ("3", 3),
            TaskType::Deadline => ("4", 4),
            TaskType::Interval => ("5", 5),
        };
        if parts.len() != arity {
            return Err(DecodeError::FieldCount {
                expected,
                found: parts.len(),
            });
        }

        let kind = match task_type {
            TaskType::Plain => TaskKind::Plain,
            TaskType::Deadline => TaskKind::Deadline {
                due: self.decode_datetime(parts[3])?,
            },
            TaskType::Interval => TaskKind::Interval {
                start: self.decode_datetime(parts[3])?,
                end: self.decode_datetime(parts[4])?,
            },
        };

        let mut task = Task::restore(description.to_string(), kind);
        if done {
            task.mark();
        }
        Ok(task)
    }

    fn decode_datetime(&self, value: &str) -> Result<NaiveDateTime, DecodeError> {
        self.format
            .parse_strict(value)
            .ok_or_else(|| DecodeError::CorruptedDateTime(value.to_string()))
    }
}
