//! Exclusive-lock coordination between independent holders.
//!
//! Each contender opens the lock file itself, so the advisory lock is
//! exercised exactly the way concurrently launched toolchain processes
//! exercise it; threads stand in for processes.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread;
use std::time::Duration;

use host_fs::LockFile;
use tempfile::tempdir;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_sequential_cycles_from_one_holder() {
    let dir = tempdir().unwrap();
    let lock_path = path_str(&dir.path().join("cache.lock"));

    for _ in 0..2 {
        let lock = LockFile::acquire(&lock_path).unwrap();
        lock.release();
    }
}

#[test]
fn test_second_holder_blocks_until_first_releases() {
    let dir = tempdir().unwrap();
    let lock_path = path_str(&dir.path().join("cache.lock"));

    let held = LockFile::acquire(&lock_path).unwrap();

    let acquired = Arc::new(AtomicBool::new(false));
    let acquired_flag = Arc::clone(&acquired);
    let contender_path = lock_path.clone();
    let contender = thread::spawn(move || {
        let lock = LockFile::acquire(&contender_path).unwrap();
        acquired_flag.store(true, Ordering::SeqCst);
        lock.release();
    });

    thread::sleep(Duration::from_millis(200));
    assert!(
        !acquired.load(Ordering::SeqCst),
        "second holder acquired while the lock was held"
    );

    held.release();
    contender.join().unwrap();
    assert!(acquired.load(Ordering::SeqCst));
}

#[test]
fn test_lock_serializes_critical_sections() {
    let dir = tempdir().unwrap();
    let lock_path = path_str(&dir.path().join("cache.lock"));

    let inside = Arc::new(AtomicU32::new(0));
    let peak = Arc::new(AtomicU32::new(0));

    let mut holders = Vec::new();
    for _ in 0..4 {
        let lock_path = lock_path.clone();
        let inside = Arc::clone(&inside);
        let peak = Arc::clone(&peak);
        holders.push(thread::spawn(move || {
            for _ in 0..5 {
                let lock = LockFile::acquire(&lock_path).unwrap();
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                thread::sleep(Duration::from_millis(2));
                inside.fetch_sub(1, Ordering::SeqCst);
                lock.release();
            }
        }));
    }
    for holder in holders {
        holder.join().unwrap();
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1, "critical section overlapped");
}
