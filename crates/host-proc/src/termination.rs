//! Normalized description of how a child process ended.

use std::process::ExitStatus;

/// How the child came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationKind {
    /// Ran to completion; `code` is the exit code.
    Exited,
    /// Killed by a signal; `code` is the signal number.
    Signaled,
    /// Stopped by a signal; `code` is the signal number.
    Stopped,
    /// The platform reported something else; `code` is the raw status.
    Unknown,
}

/// Produced once per process-wait and never revised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    pub kind: TerminationKind,
    pub code: i32,
}

impl Termination {
    /// A clean zero exit.
    pub fn success(&self) -> bool {
        self.kind == TerminationKind::Exited && self.code == 0
    }

    #[cfg(unix)]
    pub(crate) fn from_status(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            Self {
                kind: TerminationKind::Exited,
                code,
            }
        } else if let Some(signal) = status.signal() {
            Self {
                kind: TerminationKind::Signaled,
                code: signal,
            }
        } else if let Some(signal) = status.stopped_signal() {
            Self {
                kind: TerminationKind::Stopped,
                code: signal,
            }
        } else {
            Self {
                kind: TerminationKind::Unknown,
                code: status.into_raw(),
            }
        }
    }

    #[cfg(not(unix))]
    pub(crate) fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self {
                kind: TerminationKind::Exited,
                code,
            },
            None => Self {
                kind: TerminationKind::Unknown,
                code: 0,
            },
        }
    }
}
