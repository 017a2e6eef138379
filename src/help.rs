// File: ./src/help.rs
//! Command reference shown by the `help` command and by `jot --help`.

use crate::model::CommandWord;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelpItem {
    pub usage: String,
    pub desc: String,
    pub example: String,
}

fn item(usage: &str, desc: &str, example: &str) -> HelpItem {
    HelpItem {
        usage: usage.to_string(),
        desc: desc.to_string(),
        example: example.to_string(),
    }
}

pub fn help_for(word: CommandWord) -> HelpItem {
    match word {
        CommandWord::List => item("list", "Show all tasks", "list"),
        CommandWord::Help => item("help", "Show this command reference", "help"),
        CommandWord::Todo => item("todo <description>", "Add a task", "todo read book"),
        CommandWord::Deadline => item(
            "deadline <description> /by <yyyy-MM-dd HHmm>",
            "Add a task with a due date",
            "deadline return book /by 2026-01-30 1400",
        ),
        CommandWord::Event => item(
            "event <description> /from <yyyy-MM-dd HHmm> /to <yyyy-MM-dd HHmm>",
            "Add an event; the end must be after the start",
            "event meeting /from 2026-01-30 1400 /to 2026-01-30 1600",
        ),
        CommandWord::Mark => item("mark <n> [<n> ...]", "Mark tasks as done", "mark 1 3"),
        CommandWord::Unmark => item(
            "unmark <n> [<n> ...]",
            "Mark tasks as not done",
            "unmark 2",
        ),
        CommandWord::Delete => item("delete <n> [<n> ...]", "Remove tasks", "delete 2 4"),
        CommandWord::Find => item(
            "find <keyword>",
            "List tasks whose description contains the keyword (any case)",
            "find book",
        ),
        CommandWord::Bye => item("bye", "Save and quit", "bye"),
    }
}

/// One entry per command, in grammar order.
pub fn command_help() -> Vec<HelpItem> {
    use strum::IntoEnumIterator;
    CommandWord::iter().map(help_for).collect()
}
