use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Lock file inside the data directory
pub const LOCK_FILE: &str = ".lock";

/// How long writers wait for each other by default
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Exclusive advisory lock on a data directory, held until dropped.
///
/// Every writer (CLI command or TUI mutation) takes it before reloading and
/// writing the keys, so two processes never interleave their writes. The
/// lock file itself is left in place.
#[derive(Debug)]
pub struct StoreLock {
    _file: File,
    path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError { path: PathBuf, source: io::Error },
    #[error("could not lock {path}: {source}")]
    IoError { path: PathBuf, source: io::Error },
    #[error("timed out waiting for {path}: another twodo process is writing")]
    Timeout { path: PathBuf },
}

impl StoreLock {
    /// Take the lock for `data_dir`, retrying until `timeout` runs out.
    pub fn acquire(data_dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let path = data_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::CreateError {
                path: path.clone(),
                source,
            })?;

        let deadline = Instant::now() + timeout;
        let mut waiting = false;
        loop {
            match try_lock_exclusive(&file) {
                Ok(true) => {
                    if waiting {
                        tracing::debug!(path = %path.display(), "store lock acquired after wait");
                    }
                    return Ok(StoreLock { _file: file, path });
                }
                Ok(false) if Instant::now() < deadline => {
                    if !waiting {
                        tracing::warn!(path = %path.display(), "store is locked, waiting");
                        waiting = true;
                    }
                    thread::sleep(RETRY_INTERVAL);
                }
                Ok(false) => return Err(LockError::Timeout { path }),
                Err(source) => return Err(LockError::IoError { path, source }),
            }
        }
    }

    pub fn acquire_default(data_dir: &Path) -> Result<Self, LockError> {
        Self::acquire(data_dir, DEFAULT_TIMEOUT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Non-blocking `flock`. `Ok(false)` means another holder has it.
#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> io::Result<bool> {
    use std::os::unix::io::AsRawFd;
    // SAFETY: the descriptor is owned by `file`, which outlives the call.
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc == 0 {
        return Ok(true);
    }
    let err = io::Error::last_os_error();
    if err.kind() == io::ErrorKind::WouldBlock {
        Ok(false)
    } else {
        Err(err)
    }
}

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> io::Result<bool> {
    Ok(true)
}
