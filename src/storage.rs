// Manages the on-disk task file.
//
// The file holds one task per line in the format described in
// `model::adapter`. A missing file is the normal first-run state; any line
// that cannot be decoded aborts the whole load.
use crate::config::DateTimeFormat;
use crate::error::PersistenceError;
use crate::model::{LineCodec, Task};
use fs2::FileExt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const LINE_SEPARATOR: &str = "\n";
pub const BACKUP_EXTENSION: &str = "bak";

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    /// True when no data file existed yet.
    pub first_run: bool,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
    codec: LineCodec,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>, format: DateTimeFormat) -> Self {
        Self {
            path: path.into(),
            codec: LineCodec::new(format),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &LineCodec {
        &self.codec
    }

    pub fn data_file_exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<LoadOutcome, PersistenceError> {
        if !self.path.exists() {
            log::info!(
                "No data file at {}, starting with an empty list",
                self.path.display()
            );
            return Ok(LoadOutcome {
                tasks: Vec::new(),
                first_run: true,
            });
        }

        let contents = Self::with_lock(&self.path, || fs::read_to_string(&self.path)).map_err(
            |source| PersistenceError::ReadFailed {
                path: self.path.clone(),
                source,
            },
        )?;

        let tasks = self.decode_all(&contents)?;
        log::info!("Loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(LoadOutcome {
            tasks,
            first_run: false,
        })
    }

    /// Decodes file contents. Blank lines are skipped; line numbers in
    /// errors are 1-based and count blank lines too.
    pub fn decode_all(&self, contents: &str) -> Result<Vec<Task>, PersistenceError> {
        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                self.codec
                    .decode(line)
                    .map_err(|kind| PersistenceError::CorruptedLine {
                        line_no: i + 1,
                        line: line.to_string(),
                        kind,
                    })
            })
            .collect()
    }

    /// Rewrites the whole file with one line per task, creating the parent
    /// directory if needed.
    pub fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&self.codec.encode(task)?);
            contents.push_str(LINE_SEPARATOR);
        }

        let write_failed = |source: io::Error| PersistenceError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }

        Self::with_lock(&self.path, || Self::atomic_write(&self.path, &contents))
            .map_err(write_failed)?;
        log::debug!("Saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }

    /// Copies the current data file next to itself with a `.bak` suffix.
    /// Returns `None` when there is nothing to back up.
    pub fn backup(&self) -> Result<Option<PathBuf>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup_path = Self::sidecar_path(&self.path, BACKUP_EXTENSION);
        fs::copy(&self.path, &backup_path).map_err(|source| PersistenceError::WriteFailed {
            path: backup_path.clone(),
            source,
        })?;
        log::warn!(
            "Backed up unreadable data file {} to {}",
            self.path.display(),
            backup_path.display()
        );
        Ok(Some(backup_path))
    }

    /// `tasks.txt` -> `tasks.txt.<suffix>`
    fn sidecar_path(file_path: &Path, suffix: &str) -> PathBuf {
        let mut sidecar = file_path.to_path_buf();
        if let Some(ext) = sidecar.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".");
            new_ext.push(suffix);
            sidecar.set_extension(new_ext);
        } else {
            sidecar.set_extension(suffix);
        }
        sidecar
    }

    /// Runs `f` while holding an exclusive advisory lock on a sidecar
    /// `.lock` file, so two instances never interleave a read and a rewrite.
    pub fn with_lock<F, T, E>(file_path: &Path, f: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
        E: From<io::Error>,
    {
        let lock_path = Self::sidecar_path(file_path, "lock");
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> io::Result<()> {
        let path = path.as_ref();
        let tmp_path = Self::sidecar_path(path, "tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
