// End-to-end behaviour of the controller across restarts.
use jot::config::DateTimeFormat;
use jot::console::Console;
use jot::context::{AppContext, TestContext};
use jot::controller::{Reply, TaskController};
use jot::error::{Error, InputError, PersistenceError, ValidationError};
use jot::model::{CommandParser, TaskType};
use jot::storage::LocalStorage;
use std::fs;

fn open(ctx: &TestContext) -> (TaskController, Option<PersistenceError>) {
    let storage = LocalStorage::new(ctx.get_task_file_path().unwrap(), DateTimeFormat::default());
    TaskController::open(storage, CommandParser::default())
}

fn indices(reply: &Reply) -> Vec<usize> {
    match reply {
        Reply::Marked(items) | Reply::Unmarked(items) | Reply::Listing(items) => {
            items.iter().map(|i| i.index).collect()
        }
        Reply::Deleted { removed, .. } => removed.iter().map(|i| i.index).collect(),
        Reply::Found { matches, .. } => matches.iter().map(|i| i.index).collect(),
        _ => vec![],
    }
}

#[test]
fn test_todo_is_added_and_persisted() {
    let ctx = TestContext::new();
    let (mut c, _) = open(&ctx);

    match c.execute("todo read book").unwrap() {
        Reply::Added { task, total } => {
            assert_eq!(task.description(), "read book");
            assert_eq!(task.task_type(), TaskType::Plain);
            assert!(!task.is_done());
            assert_eq!(total, 1);
        }
        other => panic!("unexpected reply {:?}", other),
    }

    let (reopened, warning) = open(&ctx);
    assert!(warning.is_none());
    assert!(!reopened.first_run());
    assert_eq!(reopened.tasks().size(), 1);
}

#[test]
fn test_full_session_survives_restart() {
    let ctx = TestContext::new();
    {
        let (mut c, _) = open(&ctx);
        assert!(c.first_run());
        c.execute("todo read book").unwrap();
        c.execute("deadline return book /by 2026-01-30 1400").unwrap();
        c.execute("event meeting /from 2026-01-30 1400 /to 2026-01-30 1600")
            .unwrap();
        c.execute("todo water plants").unwrap();
        c.execute("mark 1 2").unwrap();
        c.execute("delete 4").unwrap();
        assert!(!c.first_run());
    }

    let (mut c, _) = open(&ctx);
    let listing = c.execute("list").unwrap();
    assert_eq!(indices(&listing), vec![1, 2, 3]);
    let done: Vec<bool> = c.tasks().tasks().iter().map(|t| t.is_done()).collect();
    assert_eq!(done, vec![true, true, false]);

    let found = c.execute("find BOOK").unwrap();
    assert_eq!(indices(&found), vec![1, 2]);
}

#[test]
fn test_delete_reports_in_input_order() {
    let ctx = TestContext::new();
    let (mut c, _) = open(&ctx);
    for name in ["a", "b", "c", "d"] {
        c.execute(&format!("todo {}", name)).unwrap();
    }

    let reply = c.execute("delete 1 4 2").unwrap();
    assert_eq!(indices(&reply), vec![1, 4, 2]);
    match reply {
        Reply::Deleted { removed, remaining } => {
            assert_eq!(remaining, 1);
            let names: Vec<&str> = removed.iter().map(|r| r.task.description()).collect();
            assert_eq!(names, vec!["a", "d", "b"]);
        }
        other => panic!("unexpected reply {:?}", other),
    }
    assert_eq!(c.tasks().get_at(0).unwrap().description(), "c");
}

#[test]
fn test_errors_do_not_mutate_or_write() {
    let ctx = TestContext::new();
    let (mut c, _) = open(&ctx);
    c.execute("todo a").unwrap();
    let before = fs::read_to_string(c.storage().path()).unwrap();

    assert!(matches!(
        c.execute("mark 1 1"),
        Err(Error::Input(InputError::DuplicateIndex(1)))
    ));
    assert!(matches!(
        c.execute("delete 2"),
        Err(Error::Validation(ValidationError::OutOfRange { .. }))
    ));
    assert!(matches!(
        c.execute("todo a"),
        Err(Error::Validation(ValidationError::DuplicateTask))
    ));

    assert_eq!(c.tasks().size(), 1);
    assert_eq!(fs::read_to_string(c.storage().path()).unwrap(), before);
}

#[test]
fn test_failed_save_keeps_change_in_memory_until_next_save() {
    let ctx = TestContext::new();
    let blocker = ctx.root.join("not_a_dir");
    fs::write(&blocker, "").unwrap();
    let storage = LocalStorage::new(blocker.join("tasks.txt"), DateTimeFormat::default());
    let (mut c, warning) = TaskController::open(storage, CommandParser::default());
    assert!(warning.is_none());

    let err = c.execute("todo survive").unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::WriteFailed { .. })
    ));
    assert!(err.to_string().contains("write failed"));
    assert_eq!(c.tasks().size(), 1);
    assert_eq!(c.tasks().get_at(0).unwrap().description(), "survive");

    fs::remove_file(&blocker).unwrap();
    c.execute("todo second").unwrap();
    assert_eq!(
        fs::read_to_string(c.storage().path()).unwrap(),
        "T | 0 | survive\nT | 0 | second\n"
    );
}

#[test]
fn test_corrupted_file_starts_empty_and_is_backed_up_on_save() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path().unwrap();
    fs::write(&path, "T | 9 | read book\n").unwrap();

    let (mut c, warning) = open(&ctx);
    assert!(matches!(
        warning,
        Some(PersistenceError::CorruptedLine { .. })
    ));
    assert_eq!(c.tasks().size(), 0);
    assert!(!c.first_run());

    // Read-only commands leave the bad file alone.
    c.execute("list").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 9 | read book\n");

    c.execute("todo fresh start").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "T | 0 | fresh start\n");
    let backup = path.with_file_name("tasks.txt.bak");
    assert_eq!(
        fs::read_to_string(backup).unwrap(),
        "T | 9 | read book\n"
    );
}

#[test]
fn test_bye_and_help_replies() {
    let ctx = TestContext::new();
    let (mut c, _) = open(&ctx);
    assert_eq!(c.execute("bye").unwrap(), Reply::Bye);
    match c.execute("help").unwrap() {
        Reply::Help(items) => assert!(items.iter().any(|i| i.usage.starts_with("deadline"))),
        other => panic!("unexpected reply {:?}", other),
    }
}

#[test]
fn test_console_renders_replies() {
    let ctx = TestContext::new();
    let (mut c, _) = open(&ctx);
    let console = Console::new(DateTimeFormat::default());

    let empty = console.render(&c.execute("list").unwrap());
    assert!(empty.contains("Your task list is currently empty."));

    let added = console.render(&c.execute("deadline return book /by 2026-01-30 1400").unwrap());
    assert!(added.contains("[D][ ] return book (by: Jan 30 2026 14:00)"));
    assert!(added.contains("Now you have 1 task in the list."));

    let marked = console.render(&c.execute("mark 1").unwrap());
    assert!(marked.contains("1.[D][X] return book"));

    let none = console.render(&c.execute("find zzz").unwrap());
    assert!(none.contains("No tasks match 'zzz'."));

    let err = c.execute("delete 7").unwrap_err();
    assert!(console.render_error(&err).starts_with(jot::console::DIVIDER));
    assert!(console.render_error(&err).contains("out of range"));
}
