// File: ./src/cli.rs
//! Command-line argument handling and `--help` output for the binary.
use crate::console::help_lines;
use crate::help::command_help;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub file: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
    /// Words after the options; when present they form one command to run.
    pub command: Vec<String>,
}

impl CliArgs {
    /// Parses arguments (without the program name). Options must come before
    /// the command words; everything after the first non-option is passed
    /// through untouched.
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = CliArgs::default();
        let mut iter = args.into_iter().map(Into::into);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => out.help = true,
                "-v" | "--verbose" => out.verbose = true,
                "-r" | "--root" => {
                    let value = iter.next().ok_or("--root needs a path")?;
                    out.root = Some(PathBuf::from(value));
                }
                "-f" | "--file" => {
                    let value = iter.next().ok_or("--file needs a path")?;
                    out.file = Some(PathBuf::from(value));
                }
                _ if arg.starts_with('-') => {
                    return Err(format!("Unknown option '{}'", arg));
                }
                _ => {
                    out.command.push(arg);
                    out.command.extend(iter.by_ref());
                }
            }
        }
        Ok(out)
    }

    pub fn one_shot(&self) -> Option<String> {
        (!self.command.is_empty()).then(|| self.command.join(" "))
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Jot v{} - a small task tracker driven by plain text commands",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS]                  Start the interactive prompt", binary_name);
    println!("    {} [OPTIONS] <command...>     Run a single command and exit", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -f, --file <path>     Use a specific task file.");
    println!("    -v, --verbose         Write debug output to the log file.");
    println!("    -h, --help            Show this help message.");
    println!();
    for line in help_lines(&command_help()) {
        println!("{}", line);
    }
    println!();
    println!("EXAMPLES:");
    println!("    {} todo read book", binary_name);
    println!("    {} deadline return book /by 2026-01-30 1400", binary_name);
    println!("    {} list", binary_name);
}
