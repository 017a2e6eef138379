// Round-trip tests for the task file format.
use chrono::{NaiveDate, NaiveDateTime};
use jot::config::DateTimeFormat;
use jot::context::{AppContext, TestContext};
use jot::error::{DecodeError, PersistenceError};
use jot::model::{CommandParser, LineCodec, ParsedCommand, Task, TaskKind, TaskType};
use jot::storage::LocalStorage;
use std::fs;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn storage_for(ctx: &TestContext) -> LocalStorage {
    LocalStorage::new(ctx.get_task_file_path().unwrap(), DateTimeFormat::default())
}

fn task_from(cmd: ParsedCommand) -> Task {
    match cmd {
        ParsedCommand::AddPlain { description } => Task::plain(&description).unwrap(),
        ParsedCommand::AddDeadline { description, due } => {
            Task::deadline(&description, due).unwrap()
        }
        ParsedCommand::AddInterval {
            description,
            start,
            end,
        } => Task::interval(&description, start, end).unwrap(),
        other => panic!("not an add command: {:?}", other),
    }
}

#[test]
fn test_parse_encode_decode_roundtrip() {
    let parser = CommandParser::default();
    let codec = LineCodec::default();

    for line in [
        "todo read book",
        "deadline return book /by 2026-01-30 1400",
        "deadline pay rent /by 2026-12-31 2359",
        "event meeting /from 2026-01-30 0905 /to 2026-01-30 1000",
        "event trip /from 2026-02-28 2300 /to 2026-03-01 0100",
    ] {
        for done in [false, true] {
            let mut original = task_from(parser.parse(line).unwrap());
            if done {
                original.mark();
            }
            let encoded = codec.encode(&original).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded, original, "roundtrip failed for {}", encoded);
        }
    }
}

#[test]
fn test_save_and_load_preserves_tasks() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);

    let mut todo = Task::plain("read").unwrap();
    todo.mark();
    let deadline = Task::deadline("submit", at(1, 10, 0)).unwrap();
    let event = Task::interval("meeting", at(1, 12, 0), at(1, 13, 30)).unwrap();
    let original = vec![todo, deadline, event];

    storage.save(&original).unwrap();
    let loaded = storage.load().unwrap();

    assert!(!loaded.first_run);
    assert_eq!(loaded.tasks.len(), 3);
    let types: Vec<TaskType> = loaded.tasks.iter().map(|t| t.task_type()).collect();
    assert_eq!(
        types,
        vec![TaskType::Plain, TaskType::Deadline, TaskType::Interval]
    );
    assert!(loaded.tasks[0].is_done());
    assert!(!loaded.tasks[1].is_done());
    assert_eq!(
        loaded.tasks[1].kind(),
        &TaskKind::Deadline { due: at(1, 10, 0) }
    );
    assert_eq!(loaded.tasks, original);
}

#[test]
fn test_resave_is_byte_identical() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);
    let tasks = vec![
        Task::plain("a").unwrap(),
        Task::deadline("b", at(3, 8, 15)).unwrap(),
    ];

    storage.save(&tasks).unwrap();
    let first = fs::read(storage.path()).unwrap();

    let reloaded = storage.load().unwrap().tasks;
    storage.save(&reloaded).unwrap();
    let second = fs::read(storage.path()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        String::from_utf8(first).unwrap(),
        "T | 0 | a\nD | 0 | b | 2026-02-03 0815\n"
    );
}

#[test]
fn test_save_overwrites_previous_contents() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);
    storage
        .save(&[Task::plain("a").unwrap(), Task::plain("b").unwrap()])
        .unwrap();
    storage.save(&[Task::plain("c").unwrap()]).unwrap();

    assert_eq!(fs::read_to_string(storage.path()).unwrap(), "T | 0 | c\n");
}

#[test]
fn test_data_file_exists_before_and_after_save() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);
    assert!(!storage.data_file_exists());
    storage.save(&[Task::plain("a").unwrap()]).unwrap();
    assert!(storage.data_file_exists());
}

#[test]
fn test_corrupted_done_flag_aborts_load() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);
    fs::write(storage.path(), "T | 1 | fine\nT | 9 | read book\n").unwrap();

    let err = storage.load().unwrap_err();
    assert_eq!(
        err.decode_kind(),
        Some(&DecodeError::BadDoneFlag("9".to_string()))
    );
    assert!(err.to_string().contains("bad done flag"));
}

#[test]
fn test_corrupted_type_and_dates_abort_load() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);

    for (contents, expected) in [
        (
            "X | 0 | something\n",
            DecodeError::UnknownType("X".to_string()),
        ),
        (
            "E | 0 | m | 2026-01-30 1400 | not a date\n",
            DecodeError::CorruptedDateTime("not a date".to_string()),
        ),
    ] {
        fs::write(storage.path(), contents).unwrap();
        match storage.load() {
            Err(PersistenceError::CorruptedLine { kind, line_no, .. }) => {
                assert_eq!(kind, expected);
                assert_eq!(line_no, 1);
            }
            other => panic!("expected corrupted line, got {:?}", other),
        }
    }
}

#[test]
fn test_windows_line_endings_load() {
    let ctx = TestContext::new();
    let storage = storage_for(&ctx);
    fs::write(storage.path(), "T | 0 | a\r\nT | 1 | b\r\n").unwrap();

    let tasks = storage.load().unwrap().tasks;
    assert_eq!(tasks.len(), 2);
    assert!(tasks[1].is_done());
}

#[test]
fn test_custom_pattern_is_used_on_disk() {
    let ctx = TestContext::new();
    let format = DateTimeFormat {
        input: "%d/%m/%Y %H:%M".to_string(),
        ..DateTimeFormat::default()
    };
    let storage = LocalStorage::new(ctx.get_task_file_path().unwrap(), format.clone());
    storage
        .save(&[Task::deadline("x", at(5, 9, 30)).unwrap()])
        .unwrap();

    assert_eq!(
        fs::read_to_string(storage.path()).unwrap(),
        "D | 0 | x | 05/02/2026 09:30\n"
    );
    let cmd = CommandParser::new(format)
        .parse("deadline x /by 05/02/2026 09:30")
        .unwrap();
    assert_eq!(storage.load().unwrap().tasks, vec![task_from(cmd)]);
}
