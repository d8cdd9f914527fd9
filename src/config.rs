//! Persisted reminder interval.
//!
//! The only configuration the app keeps is a single integer, the number of
//! minutes between reminders, stored as decimal text in the per-user local
//! data directory. Reading never fails: anything unexpected degrades to the
//! default interval.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

/// Directory name under the per-user local data directory.
pub const APP_DIR_NAME: &str = "Neck Protector";

const INTERVAL_FILE_NAME: &str = "saved_time.txt";

/// Minutes between two stretch reminders, always within
/// [`MIN_MINUTES`](Self::MIN_MINUTES)..=[`MAX_MINUTES`](Self::MAX_MINUTES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReminderInterval(u32);

impl ReminderInterval {
    pub const MIN_MINUTES: u32 = 2;
    pub const MAX_MINUTES: u32 = 30;
    pub const DEFAULT: Self = Self(Self::MIN_MINUTES);

    /// Returns `None` when `minutes` is out of range.
    pub fn new(minutes: u32) -> Option<Self> {
        (Self::MIN_MINUTES..=Self::MAX_MINUTES)
            .contains(&minutes)
            .then_some(Self(minutes))
    }

    /// Pulls `minutes` into range. Used for raw slider values.
    pub fn clamped(minutes: u32) -> Self {
        Self(minutes.clamp(Self::MIN_MINUTES, Self::MAX_MINUTES))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Length of one countdown in whole seconds.
    pub fn as_secs(self) -> u64 {
        u64::from(self.0) * 60
    }
}

impl Default for ReminderInterval {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ReminderInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseIntervalError {
    #[error("not a whole number: {0:?}")]
    NotANumber(String),
    #[error("{0} minutes is outside the allowed range")]
    OutOfRange(i64),
}

impl FromStr for ReminderInterval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let minutes: i64 = trimmed
            .parse()
            .map_err(|_| ParseIntervalError::NotANumber(trimmed.to_string()))?;

        u32::try_from(minutes)
            .ok()
            .and_then(Self::new)
            .ok_or(ParseIntervalError::OutOfRange(minutes))
    }
}

/// Errors raised while persisting the interval.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Per-user directory holding the interval file, the notification icon and logs.
///
/// Falls back to a directory relative to the working directory when the
/// platform has no local data directory.
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_DIR_NAME))
}

/// Reads and writes the interval file.
#[derive(Debug, Clone)]
pub struct IntervalStore {
    path: PathBuf,
}

impl IntervalStore {
    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<local data>/Neck Protector/saved_time.txt`.
    pub fn user_default() -> Self {
        Self::at(app_data_dir().join(INTERVAL_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved interval, or the default when the file is missing or invalid.
    pub fn load(&self) -> ReminderInterval {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "No saved interval, using default"
                );
                return ReminderInterval::DEFAULT;
            }
        };

        match contents.parse() {
            Ok(interval) => interval,
            Err(e) => {
                tracing::debug!(
                    path = %self.path.display(),
                    error = %e,
                    "Saved interval is invalid, using default"
                );
                ReminderInterval::DEFAULT
            }
        }
    }

    /// Overwrites the file with `interval`. Not atomic: a torn write reads back
    /// as the default.
    pub fn save(&self, interval: ReminderInterval) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, interval.to_string()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(minutes = interval.minutes(), "Reminder interval saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_negative_numbers() {
        assert_eq!(
            "-5".parse::<ReminderInterval>(),
            Err(ParseIntervalError::OutOfRange(-5))
        );
    }

    #[test]
    fn test_parse_rejects_huge_numbers() {
        let huge = i64::from(u32::MAX) + 1;
        assert_eq!(
            huge.to_string().parse::<ReminderInterval>(),
            Err(ParseIntervalError::OutOfRange(huge))
        );
    }

    #[test]
    fn test_user_default_file_name() {
        let store = IntervalStore::user_default();
        assert!(store.path().ends_with("Neck Protector/saved_time.txt"));
    }
}
