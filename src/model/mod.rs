// File: ./src/model/mod.rs
pub mod adapter;
pub mod display;
pub mod item;
pub mod parser;

pub use adapter::LineCodec;
pub use display::TaskDisplay;
pub use item::{Task, TaskKind, TaskType};
pub use parser::{CommandParser, CommandWord, ParsedCommand};
