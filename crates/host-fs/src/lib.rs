//! Portable host OS layer for the build toolchain.
//!
//! Provides path algebra, attributed file I/O, cache-aware synchronization,
//! and advisory cross-process locking, with one semantic error set across
//! POSIX and Windows.

pub mod env;
pub mod error;
pub mod file;
pub mod io;
pub mod lock;
pub mod path;
pub mod sync;
pub mod time;

pub use error::{Error, Result};
pub use file::{FileAttr, OsFile, open_read, open_write};
pub use lock::LockFile;
pub use sync::sync_file;
pub use time::{MonotonicTime, Timestamp, monotonic_now, wall_clock_now};
