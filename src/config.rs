// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::parser::RESERVED_CHAR;
use crate::storage::LocalStorage;
use anyhow::{Context, Error, Result, bail};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_INPUT_PATTERN: &str = "%Y-%m-%d %H%M";
pub const DEFAULT_DISPLAY_PATTERN: &str = "%b %d %Y %H:%M";

fn default_input_pattern() -> String {
    DEFAULT_INPUT_PATTERN.to_string()
}
fn default_display_pattern() -> String {
    DEFAULT_DISPLAY_PATTERN.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Date/time patterns handed to the parser, the line codec and the renderer.
///
/// `input` is both the pattern users type and the pattern written to disk,
/// so a file stays readable as long as the pattern does not change.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DateTimeFormat {
    #[serde(default = "default_input_pattern")]
    pub input: String,
    #[serde(default = "default_display_pattern")]
    pub display: String,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self {
            input: default_input_pattern(),
            display: default_display_pattern(),
        }
    }
}

impl DateTimeFormat {
    /// Strict parse: the value must re-format to exactly the same text.
    /// This rejects missing zero padding and stray whitespace that chrono
    /// would otherwise accept.
    pub fn parse_strict(&self, value: &str) -> Option<NaiveDateTime> {
        let dt = NaiveDateTime::parse_from_str(value, &self.input).ok()?;
        let rendered = format_with(&dt, &self.input).ok()?;
        (rendered == value).then_some(dt)
    }

    pub fn format_input(&self, dt: &NaiveDateTime) -> String {
        format_with(dt, &self.input).unwrap_or_else(|_| dt.to_string())
    }

    pub fn format_display(&self, dt: &NaiveDateTime) -> String {
        format_with(dt, &self.display).unwrap_or_else(|_| dt.to_string())
    }

    /// A sample rendering of the input pattern for error messages.
    pub fn example(&self) -> String {
        let sample = sample_datetime(14, 0)
            .and_then(|dt| format_with(&dt, &self.input).ok())
            .unwrap_or_default();
        format!("{} (e.g., {})", humanize_pattern(&self.input), sample)
    }

    /// Checks that both patterns render, and that the input pattern reads
    /// back what it writes and fits in one field of the task file.
    pub fn validate(&self) -> Result<()> {
        if self.input.contains(RESERVED_CHAR) {
            bail!(
                "Date input pattern '{}' must not contain '{}'",
                self.input,
                RESERVED_CHAR
            );
        }

        let sample = sample_datetime(23, 59)
            .ok_or_else(|| anyhow::anyhow!("Failed to build a sample date"))?;
        let rendered = format_with(&sample, &self.input)
            .map_err(|_| anyhow::anyhow!("Invalid date input pattern '{}'", self.input))?;
        format_with(&sample, &self.display)
            .map_err(|_| anyhow::anyhow!("Invalid date display pattern '{}'", self.display))?;

        if rendered.trim() != rendered || self.parse_strict(&rendered) != Some(sample) {
            bail!(
                "Date input pattern '{}' cannot read back '{}'",
                self.input,
                rendered
            );
        }
        Ok(())
    }
}

/// chrono reports a bad specifier as `fmt::Error` while rendering, which
/// `to_string()` would turn into a panic.
fn format_with(dt: &NaiveDateTime, pattern: &str) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();
    write!(out, "{}", dt.format(pattern))?;
    Ok(out)
}

fn sample_datetime(hour: u32, minute: u32) -> Option<NaiveDateTime> {
    chrono::NaiveDate::from_ymd_opt(2026, 1, 30).and_then(|d| d.and_hms_opt(hour, minute, 0))
}

fn humanize_pattern(pattern: &str) -> String {
    pattern
        .replace("%Y", "yyyy")
        .replace("%m", "MM")
        .replace("%d", "dd")
        .replace("%H", "HH")
        .replace("%M", "mm")
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Overrides the default `<data dir>/tasks.txt` location.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub datetime: DateTimeFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            // Match the serde defaults
            log_level: default_log_level(),
            datetime: DateTimeFormat::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        config
            .datetime
            .validate()
            .with_context(|| format!("Bad [datetime] in config file '{}'", path.display()))?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detects whether an error means the config file was missing, either via
    /// our explicit message or an underlying IO NotFound in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || -> Result<()> {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    /// Where the task file lives: the configured override or the default
    /// file inside the context's data directory.
    pub fn resolve_data_file(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) => Ok(p.clone()),
            None => ctx.get_task_file_path(),
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Info)
    }
}
