//! Size-rotated log stream
//!
//! A [`RotatingFile`] owns the active handle for one stream (primary or
//! error). Before every write it checks the size threshold; when the file
//! has reached it, the file is closed, renamed to `<name>.back<timestamp>`
//! and replaced by a fresh empty file, and only then is the line written.
//! The line that triggered a rotation therefore always lands whole in the
//! new file.
//!
//! The type is not synchronized. Callers that share a stream across threads
//! hold one lock for the entire [`RotatingFile::write_line`] call (see
//! [`super::dual_stream::DualStreamWriter`]).

use crate::core::error::{LoggerError, Result};
use crate::core::timestamp::backup_suffix;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default rotation threshold (10 MB)
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

/// Permission bits for newly created log files
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

fn open_append(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    file: Option<File>,
    current_size: u64,
    closed: bool,
}

impl RotatingFile {
    /// Open (or create) `path` for appending.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_bytes` is zero or the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P, max_bytes: u64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if max_bytes == 0 {
            return Err(LoggerError::config(
                "RotatingFile",
                "max size in bytes must be greater than zero",
            ));
        }

        let (file, current_size) = Self::try_reopen_file(&path)?;

        Ok(Self {
            path,
            max_bytes,
            file: Some(file),
            current_size,
            closed: false,
        })
    }

    /// `true` once the active file has reached the size threshold
    pub fn should_rotate(&self) -> bool {
        self.current_size >= self.max_bytes
    }

    /// Check, rotate if needed, then append `line`.
    ///
    /// Returns `Ok(true)` if a rotation happened before the write. A failed
    /// rotation returns an error and `line` is not written anywhere; the
    /// stream stays usable for the next call.
    pub fn write_line(&mut self, line: &str) -> Result<bool> {
        if self.closed {
            return Err(LoggerError::LoggerStopped);
        }
        if self.file.is_none() {
            self.recover()?;
        }

        let rotated = if self.should_rotate() {
            self.rotate()?;
            true
        } else {
            false
        };

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::writer("Log file handle not available"))?;
        file.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += line.len() as u64;

        Ok(rotated)
    }

    /// Close the active file, move it to a timestamped backup and open a
    /// fresh file under the original name. Returns the backup path.
    pub fn rotate(&mut self) -> Result<PathBuf> {
        let backup = self.next_backup_path();

        // Release the handle before renaming; not every platform can rename
        // a file that is still open.
        if let Some(mut file) = self.file.take() {
            let _ = file.flush();
        }

        if let Err(e) = fs::rename(&self.path, &backup) {
            let err = LoggerError::file_rotation(
                self.path.display().to_string(),
                format!("Failed to rename to '{}': {}", backup.display(), e),
            );
            self.recover_after_failure();
            return Err(err);
        }

        match open_append(&self.path) {
            Ok(file) => {
                self.file = Some(file);
                self.current_size = 0;
                Ok(backup)
            }
            Err(e) => {
                let err = LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                );
                // Put the old content back under the canonical name
                let _ = fs::rename(&backup, &self.path);
                self.recover_after_failure();
                Err(err)
            }
        }
    }

    fn recover_after_failure(&mut self) {
        if let Err(e) = self.recover() {
            eprintln!(
                "[LOGGER ERROR] Failed to reopen log file after rotation failure: {}",
                e
            );
        }
    }

    fn recover(&mut self) -> Result<()> {
        let (file, size) = Self::try_reopen_file(&self.path)?;
        self.file = Some(file);
        self.current_size = size;
        Ok(())
    }

    /// `<dir>/<name>.back<suffix>`
    fn backup_path(&self, suffix: &str) -> PathBuf {
        let filename = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log");
        self.path.with_file_name(format!("{}.back{}", filename, suffix))
    }

    /// A backup name that does not exist yet; rotations within the same
    /// millisecond get a `-<n>` counter so no backup is overwritten.
    fn next_backup_path(&self) -> PathBuf {
        let suffix = backup_suffix(&Local::now());
        let candidate = self.backup_path(&suffix);
        if !candidate.exists() {
            return candidate;
        }
        (1u32..)
            .map(|n| self.backup_path(&format!("{}-{}", suffix, n)))
            .find(|path| !path.exists())
            .unwrap_or(candidate)
    }

    fn try_reopen_file(path: &Path) -> Result<(File, u64)> {
        let file = open_append(path).map_err(|e| {
            LoggerError::file_appender(path.display().to_string(), format!("Failed to open: {}", e))
        })?;
        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();
        Ok((file, size))
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }

    /// Flush and release the handle. Later writes fail with
    /// [`LoggerError::LoggerStopped`].
    pub fn close(&mut self) -> Result<()> {
        let result = self.flush();
        self.file = None;
        self.closed = true;
        result
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
