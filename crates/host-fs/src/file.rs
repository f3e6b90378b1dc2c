//! Attributed file handles: open, read, overwrite, close.

use std::fs::{File, Metadata, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use filetime::FileTime;

use crate::error::{Error, Result, retry_interrupted};
use crate::time::Timestamp;

/// Attributes captured at the moment a file is opened.
///
/// `id` is an opaque per-platform identity usable only for equality (the
/// inode where the platform has one; zero where std exposes no stable
/// index). Synchronization never consults it — see [`FileAttr::is_equivalent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttr {
    pub id: u64,
    pub mode: u32,
    pub size: u64,
    pub mtime: Timestamp,
}

impl FileAttr {
    fn from_metadata(md: &Metadata) -> Self {
        let mtime = Timestamp::from_file_time(FileTime::from_last_modification_time(md));
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            Self {
                id: md.ino(),
                mode: md.mode(),
                size: md.size(),
                mtime,
            }
        }
        #[cfg(not(unix))]
        Self {
            id: 0,
            mode: 0,
            size: md.len(),
            mtime,
        }
    }

    /// Attribute-equivalence: two files are identical for synchronization
    /// purposes when size, mode, and mtime (seconds and nanoseconds) all
    /// match. Identity deliberately does not participate.
    pub fn is_equivalent(&self, other: &FileAttr) -> bool {
        self.size == other.size && self.mode == other.mode && self.mtime == other.mtime
    }
}

/// An exclusively-owned handle to an open file.
///
/// Obtained from [`open_read`] or [`open_write`] and released exactly once:
/// either through [`OsFile::close`] or by going out of scope. Early-error
/// paths release through scope exit, so no exit path can leak the handle,
/// and use-after-close is unrepresentable because `close` consumes it.
#[derive(Debug)]
pub struct OsFile {
    inner: File,
}

impl OsFile {
    pub(crate) fn from_std(inner: File) -> Self {
        Self { inner }
    }

    pub(crate) fn as_std(&self) -> &File {
        &self.inner
    }

    pub(crate) fn as_std_mut(&mut self) -> &mut File {
        &mut self.inner
    }

    /// Read into `buf`, retrying interrupted calls internally. A short
    /// count — including zero — signals end of stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        retry_interrupted(|| self.inner.read(buf)).map_err(Error::from)
    }

    /// Read the remainder of the stream into a growable buffer, returning
    /// the number of bytes appended.
    pub fn read_to_end(&mut self, contents: &mut Vec<u8>) -> Result<usize> {
        self.inner.read_to_end(contents).map_err(Error::from)
    }

    /// Replace the file's contents: rewind, truncate, write everything.
    pub fn overwrite(&mut self, contents: &[u8]) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(0))
            .map_err(Error::unexpected)?;
        self.inner.set_len(0).map_err(Error::unexpected)?;
        self.inner.write_all(contents).map_err(Error::from)
    }

    pub(crate) fn truncate(&mut self) -> Result<()> {
        self.inner.set_len(0).map_err(Error::unexpected)
    }

    pub(crate) fn sync_all(&self) -> Result<()> {
        self.inner.sync_all().map_err(Error::from)
    }

    pub(crate) fn set_times(&self, ts: Timestamp) -> Result<()> {
        let ft = ts.to_file_time();
        filetime::set_file_handle_times(&self.inner, Some(ft), Some(ft))
            .map_err(Error::unexpected)
    }

    /// Release the handle. Dropping releases too; `close` exists so callers
    /// can mark the release point explicitly (a lock file's unlock, say).
    pub fn close(self) {
        drop(self.inner);
    }
}

fn open_impl(path: &Path, write: bool, mode: u32) -> Result<(OsFile, FileAttr)> {
    let mut options = OpenOptions::new();
    options.read(true);
    if write {
        options.write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
    }
    #[cfg(not(unix))]
    let _ = mode;
    let file = retry_interrupted(|| options.open(path)).map_err(Error::from)?;
    let md = file.metadata().map_err(Error::from)?;
    if md.is_dir() {
        // The handle drops here; a directory handle never escapes.
        return Err(Error::IsDirectory);
    }
    Ok((OsFile::from_std(file), FileAttr::from_metadata(&md)))
}

/// Open `path` read-only, returning the handle and its attributes.
pub fn open_read(path: &str) -> Result<(OsFile, FileAttr)> {
    open_impl(Path::new(path), false, 0)
}

/// Open `path` read-write, creating it with permission bits `mode` when
/// absent. The attributes reflect the pre-existing file when there is one;
/// the caller decides whether to truncate.
pub fn open_write(path: &str, mode: u32) -> Result<(OsFile, FileAttr)> {
    open_impl(Path::new(path), true, mode)
}
