//! Single-instance guard.
//!
//! Windows uses a named kernel mutex. Other platforms hold an exclusive lock
//! on a file in the app data directory; the OS drops it when the process
//! exits, so a crash never leaves a stale lock behind.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Name of the lock shared by every instance.
pub const INSTANCE_LOCK_NAME: &str = "NeckProtectorSingleInstanceMutex";

#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("failed to open lock file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[cfg(target_os = "windows")]
    #[error("failed to create named mutex: {0}")]
    Mutex(#[from] windows::core::Error),
}

/// Held for the process lifetime; dropping it releases the lock.
#[derive(Debug)]
pub struct SingleInstance {
    #[cfg(target_os = "windows")]
    handle: windows::Win32::Foundation::HANDLE,
    #[cfg(not(target_os = "windows"))]
    _file: std::fs::File,
}

#[cfg(target_os = "windows")]
impl SingleInstance {
    /// Returns `Ok(None)` when another instance already holds the lock.
    pub fn acquire() -> Result<Option<Self>, InstanceError> {
        use windows::core::{HSTRING, PCWSTR};
        use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS};
        use windows::Win32::System::Threading::CreateMutexW;

        let name = HSTRING::from(INSTANCE_LOCK_NAME);
        // SAFETY: `name` is NUL-terminated and outlives the call; no security
        // attributes are passed.
        let handle = unsafe { CreateMutexW(None, false, PCWSTR(name.as_ptr()))? };

        // SAFETY: called right after CreateMutexW on the same thread.
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            // SAFETY: handle was just returned by CreateMutexW.
            let _ = unsafe { CloseHandle(handle) };
            return Ok(None);
        }

        Ok(Some(Self { handle }))
    }
}

#[cfg(target_os = "windows")]
impl Drop for SingleInstance {
    fn drop(&mut self) {
        // SAFETY: handle is owned by this guard and closed exactly once.
        let _ = unsafe { windows::Win32::Foundation::CloseHandle(self.handle) };
    }
}

#[cfg(not(target_os = "windows"))]
impl SingleInstance {
    /// Returns `Ok(None)` when another instance already holds the lock.
    pub fn acquire() -> Result<Option<Self>, InstanceError> {
        Self::acquire_in(&crate::config::app_data_dir(), INSTANCE_LOCK_NAME)
    }

    /// Locks `<dir>/<name>.lock`, creating `dir` if needed.
    pub fn acquire_in(dir: &std::path::Path, name: &str) -> Result<Option<Self>, InstanceError> {
        use std::fs::{self, OpenOptions, TryLockError};

        fs::create_dir_all(dir).map_err(|source| InstanceError::Open {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = dir.join(format!("{name}.lock"));
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| InstanceError::Open {
                path: path.clone(),
                source,
            })?;

        match file.try_lock() {
            Ok(()) => Ok(Some(Self { _file: file })),
            Err(TryLockError::WouldBlock) => Ok(None),
            Err(TryLockError::Error(source)) => Err(InstanceError::Lock { path, source }),
        }
    }
}
