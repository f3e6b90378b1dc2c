//! Calendar and monotonic timestamps.

use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use filetime::FileTime;

/// A point in the calendar (wall-clock) domain: seconds and nanoseconds
/// relative to the Unix epoch. File modification times live in this domain.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub sec: u64,
    pub nsec: u32,
}

impl Timestamp {
    pub fn new(sec: u64, nsec: u32) -> Self {
        Self { sec, nsec }
    }

    pub(crate) fn from_file_time(ft: FileTime) -> Self {
        Self {
            sec: ft.unix_seconds() as u64,
            nsec: ft.nanoseconds(),
        }
    }

    pub(crate) fn to_file_time(self) -> FileTime {
        FileTime::from_unix_time(self.sec as i64, self.nsec)
    }
}

/// A point in the monotonic domain, relative to the process clock anchor.
///
/// Deliberately a distinct type from [`Timestamp`]: the two clock domains
/// advance independently and comparing across them is meaningless, so the
/// mistake is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicTime {
    pub sec: u64,
    pub nsec: u32,
}

static MONOTONIC_ANCHOR: OnceLock<Instant> = OnceLock::new();

/// Pin the monotonic clock's zero point. Called from [`crate::env::init`];
/// the first reading anchors lazily if init was skipped.
pub(crate) fn anchor_monotonic_clock() {
    let _ = MONOTONIC_ANCHOR.get_or_init(Instant::now);
}

/// Current calendar time.
pub fn wall_clock_now() -> Timestamp {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => Timestamp::new(elapsed.as_secs(), elapsed.subsec_nanos()),
        Err(_) => Timestamp::default(),
    }
}

/// Current monotonic time, counted from the process clock anchor.
pub fn monotonic_now() -> MonotonicTime {
    let elapsed = MONOTONIC_ANCHOR.get_or_init(Instant::now).elapsed();
    MonotonicTime {
        sec: elapsed.as_secs(),
        nsec: elapsed.subsec_nanos(),
    }
}
