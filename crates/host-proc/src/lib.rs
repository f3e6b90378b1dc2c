//! Child-process execution for the toolchain host layer.
//!
//! Spawning on inherited streams, in-place exec, and captured execution,
//! each reporting one [`Termination`] per child. Failures use the same
//! semantic error set as the file side of the layer.

pub mod run;
pub mod termination;

pub use host_fs::{Error, Result};
pub use run::{CapturedOutput, exec, exec_capture, spawn};
pub use termination::{Termination, TerminationKind};
