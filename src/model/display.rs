// File: ./src/model/display.rs
use crate::config::DateTimeFormat;
use crate::model::item::{Task, TaskKind};

pub trait TaskDisplay {
    fn checkbox_symbol(&self) -> &'static str;
    fn type_symbol(&self) -> String;
    /// One-line human rendering, e.g. `[D][X] return book (by: Jan 30 2026 14:00)`.
    fn render(&self, format: &DateTimeFormat) -> String;
}

impl TaskDisplay for Task {
    fn checkbox_symbol(&self) -> &'static str {
        if self.is_done() { "[X]" } else { "[ ]" }
    }

    fn type_symbol(&self) -> String {
        format!("[{}]", self.task_type().code())
    }

    fn render(&self, format: &DateTimeFormat) -> String {
        let mut s = format!(
            "{}{} {}",
            self.type_symbol(),
            self.checkbox_symbol(),
            self.description()
        );
        match self.kind() {
            TaskKind::Plain => {}
            TaskKind::Deadline { due } => {
                s.push_str(&format!(" (by: {})", format.format_display(due)));
            }
            TaskKind::Interval { start, end } => {
                s.push_str(&format!(
                    " (from: {} to: {})",
                    format.format_display(start),
                    format.format_display(end)
                ));
            }
        }
        s
    }
}
