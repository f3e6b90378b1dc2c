//! End-to-end synchronization behavior against a real filesystem.
//!
//! The interesting property is the attribute-equivalence short-circuit: it
//! is observed from the outside (by planting content the short-circuit must
//! not touch), not by mocking syscalls.

use std::fs;
use std::path::Path;

use filetime::FileTime;
use host_fs::io::{read_file, write_file};
use host_fs::{open_read, sync_file};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn mtime_of(path: &str) -> FileTime {
    FileTime::from_last_modification_time(&fs::metadata(path).unwrap())
}

#[test]
fn test_sync_then_resync_leaves_attributes_identical() {
    let dir = tempdir().unwrap();
    let src = path_str(&dir.path().join("src"));
    let dst = path_str(&dir.path().join("dst"));
    write_file(&src, b"published artifact").unwrap();

    sync_file(&src, &dst).unwrap();
    let after_first = mtime_of(&dst);

    sync_file(&src, &dst).unwrap();
    let after_second = mtime_of(&dst);

    assert_eq!(after_first, after_second);
    assert_eq!(after_second, mtime_of(&src));
    assert_eq!(read_file(&dst).unwrap(), b"published artifact");
}

#[test]
fn test_second_sync_short_circuits_on_equivalence() {
    let dir = tempdir().unwrap();
    let src = path_str(&dir.path().join("src"));
    let dst = path_str(&dir.path().join("dst"));
    write_file(&src, b"aaaa").unwrap();

    sync_file(&src, &dst).unwrap();

    // Plant different content of the same size behind the destination's
    // back, then restore its mtime so size/mode/mtime all still match the
    // source. An equivalence-respecting sync must not touch it.
    write_file(&dst, b"bbbb").unwrap();
    filetime::set_file_mtime(&dst, mtime_of(&src)).unwrap();

    sync_file(&src, &dst).unwrap();
    assert_eq!(read_file(&dst).unwrap(), b"bbbb");
}

#[test]
fn test_sync_overwrites_newer_but_different_destination() {
    let dir = tempdir().unwrap();
    let src = path_str(&dir.path().join("src"));
    let dst = path_str(&dir.path().join("dst"));
    write_file(&src, b"source").unwrap();
    write_file(&dst, b"stale destination bytes").unwrap();

    // Equivalence decides staleness, not recency: a destination stamped
    // far in the future still gets replaced when its size differs.
    let future = FileTime::from_unix_time(mtime_of(&dst).unix_seconds() + 1_000_000, 0);
    filetime::set_file_mtime(&dst, future).unwrap();

    sync_file(&src, &dst).unwrap();
    assert_eq!(read_file(&dst).unwrap(), b"source");
    assert_eq!(mtime_of(&dst), mtime_of(&src));
}

#[test]
fn test_sync_large_file_round_trips() {
    let dir = tempdir().unwrap();
    let src = path_str(&dir.path().join("src"));
    let dst = path_str(&dir.path().join("dst"));

    // Larger than any single copy buffer, to exercise the streaming path.
    let mut payload = Vec::with_capacity(1 << 20);
    for i in 0..(1 << 20) {
        payload.push((i % 251) as u8);
    }
    write_file(&src, &payload).unwrap();

    sync_file(&src, &dst).unwrap();
    assert_eq!(read_file(&dst).unwrap(), payload);

    let (src_file, src_attr) = open_read(&src).unwrap();
    let (dst_file, dst_attr) = open_read(&dst).unwrap();
    assert!(src_attr.is_equivalent(&dst_attr));
    src_file.close();
    dst_file.close();
}

#[test]
fn test_interrupted_looking_destination_is_recopied() {
    let dir = tempdir().unwrap();
    let src = path_str(&dir.path().join("src"));
    let dst = path_str(&dir.path().join("dst"));
    write_file(&src, b"full artifact contents").unwrap();

    // A crash between copy and stamp leaves content without the source's
    // mtime. The next run must not trust it.
    write_file(&dst, b"full artifact contents").unwrap();

    sync_file(&src, &dst).unwrap();
    assert_eq!(mtime_of(&dst), mtime_of(&src));
    assert_eq!(read_file(&dst).unwrap(), b"full artifact contents");
}
