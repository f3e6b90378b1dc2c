//! Cache-aware file synchronization.

use tracing::{debug, trace};

use crate::error::Result;
use crate::file;
use crate::io::copy_contents;

/// Make `dst_path` match `src_path`.
///
/// Opens (or creates) both files and compares their attributes. When they
/// are already attribute-equivalent the call returns immediately — the
/// dominant path for a build cache, where most invocations observe
/// unchanged inputs. Otherwise the destination is truncated, the source
/// streamed across through a bounded buffer, the destination flushed
/// durably, and only then is its mtime stamped with exactly the source's.
///
/// The stamp must follow the flush. A crash between content write and
/// stamp leaves the attributes mismatched, so the next run re-copies in
/// full instead of trusting a half-finished file; stamping first would
/// make stale content look synced.
///
/// On failure the destination is indeterminate; nothing is rolled back and
/// the caller must treat the sync as failed, not partial.
pub fn sync_file(src_path: &str, dst_path: &str) -> Result<()> {
    let (mut src, src_attr) = file::open_read(src_path)?;
    let (mut dst, dst_attr) = file::open_write(dst_path, src_attr.mode)?;

    if src_attr.is_equivalent(&dst_attr) {
        trace!(src = src_path, dst = dst_path, "attributes match, nothing to do");
        return Ok(());
    }

    dst.truncate()?;
    let copied = copy_contents(&mut src, &mut dst)?;
    dst.sync_all()?;
    dst.set_times(src_attr.mtime)?;
    debug!(src = src_path, dst = dst_path, bytes = copied, "synchronized");
    Ok(())
}
