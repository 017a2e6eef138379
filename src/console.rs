// File: ./src/console.rs
//! Plain-text rendering for the console front end.
//!
//! Everything here is a pure function from a reply (or error) to the text
//! printed for it, so output can be checked without touching stdin/stdout.
use crate::config::DateTimeFormat;
use crate::controller::Reply;
use crate::error::{Error, PersistenceError};
use crate::help::HelpItem;
use crate::model::TaskDisplay;
use crate::store::IndexedTask;
use unicode_width::UnicodeWidthStr;

pub const DIVIDER: &str = "____________________________________________________________";

#[derive(Debug, Clone, Default)]
pub struct Console {
    format: DateTimeFormat,
}

impl Console {
    pub fn new(format: DateTimeFormat) -> Self {
        Self { format }
    }

    pub fn welcome(&self, first_run: bool) -> String {
        let mut lines = vec!["Hello! I'm Jot.".to_string()];
        if first_run {
            lines.push("No saved tasks yet, starting an empty list!".to_string());
        }
        lines.push("What can I do for you?".to_string());
        boxed(lines)
    }

    pub fn load_warning(&self, err: &PersistenceError) -> String {
        boxed(vec![
            "Saved data could not be read, starting with an empty list.".to_string(),
            err.to_string(),
            "The old file will be backed up before the next save.".to_string(),
        ])
    }

    pub fn render(&self, reply: &Reply) -> String {
        match reply {
            Reply::Listing(tasks) => {
                if tasks.is_empty() {
                    return boxed(vec!["Your task list is currently empty.".to_string()]);
                }
                let mut lines = vec!["Here are the tasks in your list:".to_string()];
                lines.extend(self.numbered(tasks));
                boxed(lines)
            }
            Reply::Help(items) => boxed(help_lines(items)),
            Reply::Added { task, total } => boxed(vec![
                "Got it. I've added this task:".to_string(),
                format!("  {}", task.render(&self.format)),
                count_line(*total),
            ]),
            Reply::Marked(tasks) => {
                let mut lines = vec!["Nice! I've marked these tasks as done:".to_string()];
                lines.extend(self.numbered(tasks));
                boxed(lines)
            }
            Reply::Unmarked(tasks) => {
                let mut lines = vec!["OK, I've marked these tasks as not done yet:".to_string()];
                lines.extend(self.numbered(tasks));
                boxed(lines)
            }
            Reply::Deleted { removed, remaining } => {
                let mut lines = vec!["Noted. I've removed these tasks:".to_string()];
                lines.extend(self.numbered(removed));
                lines.push(count_line(*remaining));
                boxed(lines)
            }
            Reply::Found { keyword, matches } => {
                if matches.is_empty() {
                    return boxed(vec![format!("No tasks match '{}'.", keyword)]);
                }
                let mut lines = vec!["Here are the matching tasks in your list:".to_string()];
                lines.extend(self.numbered(matches));
                boxed(lines)
            }
            Reply::Bye => boxed(vec!["Bye. Hope to see you again soon!".to_string()]),
        }
    }

    pub fn render_error(&self, err: &Error) -> String {
        let line = match err {
            Error::Input(e) => e.to_string(),
            Error::Validation(e) => format!("Can't do that: {}", e),
            Error::Persistence(e) => format!(
                "Your change is kept in memory but could not be saved: {}",
                e
            ),
        };
        boxed(vec![line])
    }

    fn numbered(&self, tasks: &[IndexedTask]) -> Vec<String> {
        tasks
            .iter()
            .map(|it| format!("{}.{}", it.index, it.task.render(&self.format)))
            .collect()
    }
}

fn count_line(total: usize) -> String {
    let noun = if total == 1 { "task" } else { "tasks" };
    format!("Now you have {} {} in the list.", total, noun)
}

/// Two aligned columns: usage and description, then the example.
pub fn help_lines(items: &[HelpItem]) -> Vec<String> {
    let width = items
        .iter()
        .map(|it| it.usage.width())
        .max()
        .unwrap_or(0);

    let mut lines = vec!["Commands:".to_string()];
    for it in items {
        let pad = " ".repeat(width - it.usage.width());
        lines.push(format!("  {}{}  {}", it.usage, pad, it.desc));
        lines.push(format!("  {}  e.g. {}", " ".repeat(width), it.example));
    }
    lines
}

fn boxed(lines: Vec<String>) -> String {
    let mut out = String::from(DIVIDER);
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out.push('\n');
    out.push_str(DIVIDER);
    out
}
