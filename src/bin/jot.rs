// Binary entry point for the interactive prompt and one-shot commands.
use anyhow::{Context, Result};
use jot::cli::{CliArgs, print_help};
use jot::config::Config;
use jot::console::Console;
use jot::context::{AppContext, StandardContext};
use jot::controller::{Reply, TaskController};
use jot::model::CommandParser;
use jot::storage::LocalStorage;
use simplelog::{LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::io::{self, BufRead, Write};

fn init_logging(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx.get_log_file_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;
    WriteLogger::init(level, simplelog::Config::default(), file)
        .context("Failed to initialise logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!("Try 'jot --help'.");
            std::process::exit(2);
        }
    };

    if args.help {
        print_help("jot");
        return Ok(());
    }

    let ctx = StandardContext::new(args.root.clone());
    let config = Config::load_or_default(&ctx)?;

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.log_level_filter()
    };
    // Logging is best effort; the tracker works without it.
    if let Err(e) = init_logging(&ctx, level) {
        eprintln!("Warning: {:#}", e);
    }

    let data_file = match &args.file {
        Some(p) => p.clone(),
        None => config.resolve_data_file(&ctx)?,
    };
    log::info!("Using data file {}", data_file.display());

    let storage = LocalStorage::new(data_file, config.datetime.clone());
    let parser = CommandParser::new(config.datetime.clone());
    let console = Console::new(config.datetime.clone());
    let (mut controller, warning) = TaskController::open(storage, parser);

    if let Some(line) = args.one_shot() {
        if let Some(e) = &warning {
            eprintln!("{}", console.load_warning(e));
        }
        return match controller.execute(&line) {
            Ok(reply) => {
                println!("{}", console.render(&reply));
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", console.render_error(&e));
                std::process::exit(1);
            }
        };
    }

    println!("{}", console.welcome(controller.first_run()));
    if let Some(e) = &warning {
        println!("{}", console.load_warning(e));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let output = match controller.execute(&line) {
            Ok(Reply::Bye) => {
                println!("{}", console.render(&Reply::Bye));
                return Ok(());
            }
            Ok(reply) => console.render(&reply),
            Err(e) => {
                log::debug!("Command failed: {}", e);
                console.render_error(&e)
            }
        };
        println!("{}", output);
        stdout.flush()?;
    }

    log::info!("Input closed, exiting");
    Ok(())
}
