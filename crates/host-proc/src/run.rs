//! Spawn, exec, and captured execution.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use host_fs::{Error, Result};

use crate::termination::Termination;

/// Everything [`exec_capture`] learns about a finished child: how it ended
/// and the complete contents of both captured streams.
#[derive(Debug)]
pub struct CapturedOutput {
    pub term: Termination,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

fn command(args: &[&str]) -> Command {
    assert!(
        !args.is_empty(),
        "child process needs at least an executable name"
    );
    let mut cmd = Command::new(args[0]);
    cmd.args(&args[1..]);
    cmd
}

/// Run a child on the parent's standard streams and block until it ends.
pub fn spawn(args: &[&str]) -> Result<Termination> {
    let status = command(args).status().map_err(Error::from)?;
    let term = Termination::from_status(status);
    debug!(exe = args[0], code = term.code, "child finished");
    Ok(term)
}

/// Replace this process with the child. Does not return on success; the
/// error comes back to the still-running caller when the launch fails.
#[cfg(unix)]
pub fn exec(args: &[&str]) -> Error {
    use std::os::unix::process::CommandExt;
    command(args).exec().into()
}

/// Replace this process with the child. Does not return on success; the
/// error comes back to the still-running caller when the launch fails.
///
/// Without in-place image replacement the effect is reproduced by running
/// the child to completion and exiting with its exact code, which is
/// indistinguishable from the outside.
#[cfg(not(unix))]
pub fn exec(args: &[&str]) -> Error {
    match command(args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => err.into(),
    }
}

/// Run a child with stdout and stderr redirected through parent-owned
/// pipes, returning both streams complete once it exits.
///
/// A launch-time failure (executable not found, say) surfaces as the spawn
/// error — a one-shot side channel distinct from any normal nonzero exit.
/// Both pipes are drained while the child runs, stderr on a helper thread
/// and stdout here, and only afterwards does the parent wait: waiting
/// first would deadlock as soon as the child fills one pipe's buffer.
/// The child's stdin is closed.
pub fn exec_capture(args: &[&str]) -> Result<CapturedOutput> {
    let mut child = command(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(Error::from)?;

    let mut stderr_pipe = child.stderr.take().expect("stderr was piped at spawn");
    let stderr_reader = thread::spawn(move || {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).map(|_| buf)
    });

    let mut stdout_pipe = child.stdout.take().expect("stdout was piped at spawn");
    let mut stdout = Vec::new();
    stdout_pipe.read_to_end(&mut stdout).map_err(Error::from)?;
    drop(stdout_pipe);

    let stderr = stderr_reader
        .join()
        .expect("stderr reader thread panicked")
        .map_err(Error::from)?;

    let status = child.wait().map_err(Error::from)?;
    let term = Termination::from_status(status);
    debug!(
        exe = args[0],
        code = term.code,
        stdout_len = stdout.len(),
        stderr_len = stderr.len(),
        "captured child finished"
    );
    Ok(CapturedOutput {
        term,
        stdout,
        stderr,
    })
}
