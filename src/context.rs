// File: ./src/context.rs
//! Where `jot` keeps its files.
//!
//! The task file and the log sit in the data directory, `config.toml` in the
//! config directory. Anything that reads or writes them is handed a
//! `&dyn AppContext`, so tests point the whole program at a scratch root.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const TASK_FILE_NAME: &str = "tasks.txt";
pub const LOG_FILE_NAME: &str = "jot.log";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub trait AppContext: std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join(CONFIG_FILE_NAME))
    }

    fn get_task_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(TASK_FILE_NAME))
    }

    fn get_log_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_data_dir()?.join(LOG_FILE_NAME))
    }
}

fn created(path: PathBuf) -> Result<PathBuf> {
    fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create directory {}", path.display()))?;
    Ok(path)
}

/// Platform directories, or `<root>/data` and `<root>/config` when the
/// binary runs with `--root`.
#[derive(Clone, Debug)]
pub struct StandardContext {
    root: Option<PathBuf>,
}

impl StandardContext {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn dir(&self, under_root: &str, platform: fn(&ProjectDirs) -> &Path) -> Result<PathBuf> {
        let path = match &self.root {
            Some(root) => root.join(under_root),
            None => {
                let dirs = ProjectDirs::from("org", "jot", "jot")
                    .context("Cannot locate a home directory for jot's files")?;
                platform(&dirs).to_path_buf()
            }
        };
        created(path)
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.dir("data", ProjectDirs::data_dir)
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.dir("config", ProjectDirs::config_dir)
    }
}

/// Scratch root for one test: `jot_test_<uuid>` under the temp dir, deleted
/// again when the value goes out of scope.
#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("jot_test_{}", uuid::Uuid::new_v4()));
        if let Err(e) = fs::create_dir_all(&root) {
            log::warn!("Could not create test root {}: {}", root.display(), e);
        }
        Self { root }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        created(self.root.join("data"))
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        created(self.root.join("config"))
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
