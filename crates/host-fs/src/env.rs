//! Process environment: working directory, canonical paths, per-user
//! directories, and once-only process setup.

use std::io::IsTerminal;
use std::sync::Once;

use tracing::debug;

use crate::error::{Error, Result};
use crate::path;
use crate::time;

/// The process working directory as a path string.
///
/// An unobtainable working directory is an invariant violation: path
/// resolution is total and has nothing sensible to return without one.
pub fn current_dir() -> String {
    match std::env::current_dir() {
        Ok(dir) => dir.to_string_lossy().into_owned(),
        Err(err) => panic!("unable to determine working directory: {err}"),
    }
}

/// Canonicalize `path` through the platform resolver (symlinks followed,
/// existence required), without the `\\?\` prefix on Windows.
pub fn real_path(path: &str) -> Result<String> {
    let real = dunce::canonicalize(path).map_err(Error::from)?;
    Ok(real.to_string_lossy().into_owned())
}

/// Path of the running executable.
pub fn self_exe_path() -> Result<String> {
    let exe = std::env::current_exe().map_err(Error::from)?;
    Ok(exe.to_string_lossy().into_owned())
}

/// The per-user directory the toolchain keeps its global cache under, with
/// `appname` appended: the XDG cache root on POSIX, `Application Support`
/// on macOS, local AppData on Windows.
pub fn app_data_dir(appname: &str) -> Result<String> {
    let base = if cfg!(windows) || cfg!(target_os = "macos") {
        dirs::data_local_dir()
    } else {
        dirs::cache_dir()
    };
    match base {
        Some(dir) => Ok(path::join(&dir.to_string_lossy(), appname)),
        None => Err(Error::NotFound),
    }
}

/// Whether stderr is attached to a terminal.
pub fn stderr_is_tty() -> bool {
    std::io::stderr().is_terminal()
}

static INIT: Once = Once::new();

/// Once-only process setup owned by this layer: anchors the monotonic
/// clock and, on POSIX, raises the soft open-file limit toward the hard
/// limit — the toolchain holds many cache files open at once. Callable any
/// number of times from any thread.
pub fn init() {
    INIT.call_once(|| {
        time::anchor_monotonic_clock();
        #[cfg(unix)]
        raise_fd_limit();
        debug!("host layer initialized");
    });
}

/// Binary-search the largest soft RLIMIT_NOFILE the kernel will grant,
/// short-circuiting to the hard limit when one is defined.
#[cfg(unix)]
fn raise_fd_limit() {
    // SAFETY: getrlimit/setrlimit only read and write the struct passed in.
    unsafe {
        let mut lim = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        if libc::getrlimit(libc::RLIMIT_NOFILE, &mut lim) != 0 || lim.rlim_cur == lim.rlim_max {
            return;
        }
        let mut min = lim.rlim_cur;
        let mut max: libc::rlim_t = 1 << 20;
        if lim.rlim_max != libc::RLIM_INFINITY {
            min = lim.rlim_max;
            max = lim.rlim_max;
        }
        loop {
            lim.rlim_cur = min + (max - min) / 2;
            if libc::setrlimit(libc::RLIMIT_NOFILE, &lim) != 0 {
                max = lim.rlim_cur;
            } else {
                min = lim.rlim_cur;
            }
            if min + 1 >= max {
                break;
            }
        }
    }
}
