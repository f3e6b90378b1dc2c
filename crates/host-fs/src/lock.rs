//! Advisory cross-process locking.

use std::fs::OpenOptions;
use std::path::Path;

use fs2::FileExt;
use tracing::trace;

use crate::error::{Error, Result, retry_interrupted};
use crate::file::OsFile;

/// An exclusive advisory lock, held for the lifetime of the value.
///
/// Serializes one-at-a-time initialization of a shared cache artifact
/// across independently launched processes: whoever acquires first runs,
/// everyone else blocks. The lock is released exclusively by closing the
/// handle — [`LockFile::release`] or scope exit. Acquiring the same lock
/// again from the same holder before releasing deadlocks; that is the
/// caller's contract, not a detected condition.
#[derive(Debug)]
pub struct LockFile {
    file: OsFile,
}

impl LockFile {
    /// Open or create the lock file, then block — without timeout — until
    /// the exclusive lock is granted.
    pub fn acquire(path: &str) -> Result<LockFile> {
        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o666);
        }
        let file = retry_interrupted(|| options.open(Path::new(path))).map_err(Error::from)?;
        retry_interrupted(|| file.lock_exclusive()).map_err(Error::from)?;
        trace!(path, "exclusive lock acquired");
        Ok(LockFile {
            file: OsFile::from_std(file),
        })
    }

    /// Release by closing the handle.
    pub fn release(self) {
        self.file.close();
    }
}
