//! The shared error taxonomy for the host layer.

use std::io;

/// Result type for host layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Semantic errors surfaced by every I/O-performing operation in the layer.
///
/// This is a closed set: callers branch on specific variants rather than on
/// mere success/failure. `NotFound` on a build-file lookup drives a
/// parent-directory search; `AlreadyExists` on directory creation is treated
/// as success. Path algebra is total and never produces these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("is a directory")]
    IsDirectory,

    #[error("not a directory")]
    NotDirectory,

    #[error("path already exists")]
    AlreadyExists,

    #[error("resource busy")]
    Busy,

    #[error("system resources exhausted")]
    SystemResources,

    #[error("no space left on device")]
    DiskFull,

    #[error("disk quota exceeded")]
    DiskQuotaExceeded,

    #[error("file too big")]
    FileTooBig,

    #[error("filesystem error: {0}")]
    Filesystem(#[source] io::Error),

    #[error("unexpected OS error: {0}")]
    Unexpected(#[source] io::Error),
}

impl Error {
    /// Wrap a platform failure that has no semantic slot and should not
    /// occur under this layer's own usage pattern.
    pub(crate) fn unexpected(err: io::Error) -> Self {
        Error::Unexpected(err)
    }
}

impl From<io::Error> for Error {
    /// The single point where raw platform failure signals become semantic
    /// errors. Interrupted calls are retried below this boundary and must
    /// not reach it.
    fn from(err: io::Error) -> Self {
        use std::io::ErrorKind;

        #[cfg(windows)]
        {
            // Sharing violations have no stable ErrorKind.
            const ERROR_SHARING_VIOLATION: i32 = 32;
            if err.raw_os_error() == Some(ERROR_SHARING_VIOLATION) {
                return Error::Busy;
            }
        }

        match err.kind() {
            ErrorKind::NotFound => Error::NotFound,
            ErrorKind::PermissionDenied => Error::AccessDenied,
            ErrorKind::IsADirectory => Error::IsDirectory,
            ErrorKind::NotADirectory => Error::NotDirectory,
            ErrorKind::AlreadyExists => Error::AlreadyExists,
            ErrorKind::ResourceBusy | ErrorKind::ExecutableFileBusy => Error::Busy,
            ErrorKind::OutOfMemory => Error::SystemResources,
            ErrorKind::StorageFull => Error::DiskFull,
            ErrorKind::QuotaExceeded => Error::DiskQuotaExceeded,
            ErrorKind::FileTooLarge => Error::FileTooBig,
            _ => {
                #[cfg(unix)]
                {
                    // Descriptor-table exhaustion surfaces as raw errno only.
                    if matches!(err.raw_os_error(), Some(libc::EMFILE) | Some(libc::ENFILE)) {
                        return Error::SystemResources;
                    }
                }
                Error::Filesystem(err)
            }
        }
    }
}

/// Run a syscall wrapper again for as long as it reports an interrupted
/// call. Nothing above the mapping boundary ever observes `EINTR`.
pub(crate) fn retry_interrupted<T>(mut f: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    loop {
        match f() {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
