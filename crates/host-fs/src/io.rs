//! Path-level filesystem operations built on the attributed open primitives.

use std::fs;
use std::io;

use crate::error::{Error, Result};
use crate::file::{self, OsFile};
use crate::path;

/// Whether anything exists at `path`.
pub fn exists(path: &str) -> bool {
    fs::metadata(path).is_ok()
}

/// Read a whole file.
pub fn read_file(path: &str) -> Result<Vec<u8>> {
    let (mut file, attr) = file::open_read(path)?;
    let mut contents = Vec::with_capacity(attr.size as usize);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Create or truncate `path` and write `contents` to it.
pub fn write_file(path: &str, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).map_err(Error::from)
}

/// Copy `src` over `dst` unconditionally, streaming through a bounded
/// buffer. For the attribute-aware variant that skips identical files, see
/// [`crate::sync::sync_file`].
pub fn copy_file(src: &str, dst: &str) -> Result<()> {
    let (mut src_file, _) = file::open_read(src)?;
    let (mut dst_file, _) = file::open_write(dst, 0o666)?;
    dst_file.truncate()?;
    copy_contents(&mut src_file, &mut dst_file)?;
    Ok(())
}

/// Stream the remainder of `src` into `dst`, returning the byte count.
/// Bounded memory regardless of file size; interrupted calls retry below.
pub(crate) fn copy_contents(src: &mut OsFile, dst: &mut OsFile) -> Result<u64> {
    io::copy(src.as_std_mut(), dst.as_std_mut()).map_err(Error::from)
}

/// Delete a file.
pub fn remove_file(path: &str) -> Result<()> {
    fs::remove_file(path).map_err(Error::from)
}

/// Rename `src` over `dst`, replacing any existing destination. Renaming a
/// path onto itself is a no-op.
pub fn rename(src: &str, dst: &str) -> Result<()> {
    if src == dst {
        return Ok(());
    }
    fs::rename(src, dst).map_err(Error::from)
}

/// Create a single directory level.
pub fn make_dir(path: &str) -> Result<()> {
    fs::create_dir(path).map_err(Error::from)
}

/// Create a directory and any missing ancestors.
///
/// Resolves to an absolute path, then retries level by level: NotFound
/// marches the component boundary back toward the root, success marches it
/// forward, and AlreadyExists on an intermediate level just keeps going.
pub fn make_path(path: &str) -> Result<()> {
    let resolved = path::resolve(&[path]);
    let bytes = resolved.as_bytes();
    let mut end = resolved.len();
    loop {
        match make_dir(&resolved[..end]) {
            Ok(()) => {}
            Err(Error::AlreadyExists) => {
                if end == resolved.len() {
                    return Ok(());
                }
            }
            Err(Error::NotFound) => {
                loop {
                    end -= 1;
                    if path::is_sep(bytes[end] as char) {
                        break;
                    }
                }
                continue;
            }
            Err(err) => return Err(err),
        }
        if end == resolved.len() {
            return Ok(());
        }
        loop {
            end += 1;
            if end == resolved.len() || path::is_sep(bytes[end] as char) {
                break;
            }
        }
    }
}
