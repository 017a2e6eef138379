// File: src/controller.rs
//! Central logic controller for task operations.
//! Front ends hand it raw input lines; it parses them, applies the result to
//! the task list, writes the file through after every change and returns a
//! typed [`Reply`] for the front end to render.
use crate::error::{PersistenceError, Result};
use crate::help::{HelpItem, command_help};
use crate::model::{CommandParser, ParsedCommand, Task};
use crate::storage::LocalStorage;
use crate::store::{IndexedTask, TaskList};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Listing(Vec<IndexedTask>),
    Help(Vec<HelpItem>),
    Added {
        task: Task,
        total: usize,
    },
    Marked(Vec<IndexedTask>),
    Unmarked(Vec<IndexedTask>),
    /// Removed tasks in the order the user listed them.
    Deleted {
        removed: Vec<IndexedTask>,
        remaining: usize,
    },
    Found {
        keyword: String,
        matches: Vec<IndexedTask>,
    },
    Bye,
}

#[derive(Debug)]
pub struct TaskController {
    tasks: TaskList,
    storage: LocalStorage,
    parser: CommandParser,
    first_run: bool,
    /// Set when startup could not read the file; the next save backs it up
    /// before overwriting it.
    pending_backup: bool,
}

impl TaskController {
    /// Loads the task file. When it cannot be read the controller starts
    /// empty and the error is handed back as a warning; the file itself is
    /// left alone until the next successful save.
    pub fn open(storage: LocalStorage, parser: CommandParser) -> (Self, Option<PersistenceError>) {
        let (tasks, first_run, warning) = match storage.load() {
            Ok(outcome) => (
                TaskList::from_tasks(outcome.tasks),
                outcome.first_run,
                None,
            ),
            Err(e) => {
                log::warn!("Starting with an empty list: {}", e);
                (TaskList::new(), false, Some(e))
            }
        };

        let controller = Self {
            tasks,
            storage,
            parser,
            first_run,
            pending_backup: warning.is_some(),
        };
        (controller, warning)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Whether no data file existed when the controller was opened.
    pub fn first_run(&self) -> bool {
        self.first_run
    }

    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let command = self.parser.parse(line)?;
        self.apply(command)
    }

    /// Applies a parsed command. Validation failures leave the list as it
    /// was. A failed save is returned as an error, but the in-memory change
    /// is kept so a later save can still persist it.
    pub fn apply(&mut self, command: ParsedCommand) -> Result<Reply> {
        log::debug!("Applying {:?}", command);
        let reply = match command {
            ParsedCommand::List => return Ok(Reply::Listing(self.tasks.snapshot())),
            ParsedCommand::Help => return Ok(Reply::Help(command_help())),
            ParsedCommand::Find { keyword } => {
                let matches = self.tasks.find_by_keyword(&keyword);
                return Ok(Reply::Found { keyword, matches });
            }
            ParsedCommand::Bye => return Ok(Reply::Bye),
            ParsedCommand::AddPlain { description } => self.add(Task::plain(&description)?)?,
            ParsedCommand::AddDeadline { description, due } => {
                self.add(Task::deadline(&description, due)?)?
            }
            ParsedCommand::AddInterval {
                description,
                start,
                end,
            } => self.add(Task::interval(&description, start, end)?)?,
            ParsedCommand::Mark { indices } => Reply::Marked(self.tasks.mark_many(&indices)?),
            ParsedCommand::Unmark { indices } => {
                Reply::Unmarked(self.tasks.unmark_many(&indices)?)
            }
            ParsedCommand::Delete { indices } => {
                let removed = self.tasks.delete_many(&indices)?;
                Reply::Deleted {
                    removed,
                    remaining: self.tasks.size(),
                }
            }
        };

        self.persist()?;
        Ok(reply)
    }

    fn add(&mut self, task: Task) -> Result<Reply> {
        self.tasks.append(task.clone())?;
        Ok(Reply::Added {
            task,
            total: self.tasks.size(),
        })
    }

    /// Writes the current list to disk.
    pub fn persist(&mut self) -> std::result::Result<(), PersistenceError> {
        if self.pending_backup {
            self.storage.backup()?;
        }
        self.storage.save(self.tasks.tasks())?;
        self.pending_backup = false;
        self.first_run = false;
        Ok(())
    }
}
