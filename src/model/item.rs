// File: ./src/model/item.rs
use crate::error::ValidationError;
use chrono::NaiveDateTime;
use strum::{Display, EnumIter};

/// The variant-specific part of a task.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TaskKind {
    Plain,
    Deadline {
        due: NaiveDateTime,
    },
    /// Invariant (checked by [`Task::interval`]): `end` is strictly after `start`.
    Interval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Discriminant of [`TaskKind`] without its payload.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Display, EnumIter)]
pub enum TaskType {
    #[strum(to_string = "ToDo")]
    Plain,
    #[strum(to_string = "Deadline")]
    Deadline,
    #[strum(to_string = "Event")]
    Interval,
}

impl TaskType {
    /// Single-letter code used in the data file and in listings.
    pub fn code(self) -> char {
        match self {
            TaskType::Plain => 'T',
            TaskType::Deadline => 'D',
            TaskType::Interval => 'E',
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "T" => Some(TaskType::Plain),
            "D" => Some(TaskType::Deadline),
            "E" => Some(TaskType::Interval),
            _ => None,
        }
    }
}

impl TaskKind {
    pub fn task_type(&self) -> TaskType {
        match self {
            TaskKind::Plain => TaskType::Plain,
            TaskKind::Deadline { .. } => TaskType::Deadline,
            TaskKind::Interval { .. } => TaskType::Interval,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    fn checked(description: &str, kind: TaskKind) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(Self::restore(description.to_string(), kind))
    }

    pub fn plain(description: &str) -> Result<Self, ValidationError> {
        Self::checked(description, TaskKind::Plain)
    }

    pub fn deadline(description: &str, due: NaiveDateTime) -> Result<Self, ValidationError> {
        Self::checked(description, TaskKind::Deadline { due })
    }

    pub fn interval(
        description: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Self::checked(description, TaskKind::Interval { start, end })
    }

    /// Rebuilds a task from stored data. Ordering of interval bounds is not
    /// re-checked here; it is only enforced when a task is first created.
    pub(crate) fn restore(description: String, kind: TaskKind) -> Self {
        Self {
            description,
            done: false,
            kind,
        }
    }

    pub fn mark(&mut self) {
        self.done = true;
    }

    pub fn unmark(&mut self) {
        self.done = false;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }

    /// Structural equality used for duplicate detection: same variant, same
    /// description and same date fields. Completion state is ignored.
    pub fn has_same_details(&self, other: &Task) -> bool {
        self.kind == other.kind && self.description == other.description
    }
}
