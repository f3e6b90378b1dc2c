//! Captured execution under pipe-buffer pressure.
//!
//! A child that writes far more than a pipe buffer to both streams will
//! block forever against a parent that waits before reading; these tests
//! pin the drain-then-wait ordering.

#![cfg(unix)]

use host_proc::{TerminationKind, exec_capture};
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[test]
fn test_capture_survives_oversized_stdout_then_stderr() {
    init_tracing();
    // 100 KiB per stream, well past the 64 KiB pipe buffer.
    let captured = exec_capture(&[
        "sh",
        "-c",
        "head -c 100000 /dev/zero; head -c 100000 /dev/zero 1>&2",
    ])
    .unwrap();

    assert!(captured.term.success());
    assert_eq!(captured.stdout.len(), 100_000);
    assert_eq!(captured.stderr.len(), 100_000);
    assert!(captured.stdout.iter().all(|&b| b == 0));
    assert!(captured.stderr.iter().all(|&b| b == 0));
}

#[test]
fn test_capture_survives_oversized_stderr_then_stdout() {
    init_tracing();
    // Reverse order: the child saturates stderr before stdout has a byte,
    // so the parent must be draining stderr concurrently.
    let captured = exec_capture(&[
        "sh",
        "-c",
        "head -c 100000 /dev/zero 1>&2; head -c 100000 /dev/zero",
    ])
    .unwrap();

    assert!(captured.term.success());
    assert_eq!(captured.stdout.len(), 100_000);
    assert_eq!(captured.stderr.len(), 100_000);
}

#[test]
fn test_capture_interleaved_writers_stay_byte_exact() {
    init_tracing();
    let script = "i=0; while [ $i -lt 5000 ]; do printf abcd; printf wxyz 1>&2; i=$((i+1)); done";
    let captured = exec_capture(&["sh", "-c", script]).unwrap();

    assert!(captured.term.success());
    assert_eq!(captured.stdout, "abcd".repeat(5000).into_bytes());
    assert_eq!(captured.stderr, "wxyz".repeat(5000).into_bytes());
}

#[test]
fn test_capture_reports_nonzero_exit_with_partial_output() {
    init_tracing();
    let captured = exec_capture(&["sh", "-c", "printf 'before failure'; exit 21"]).unwrap();

    assert_eq!(captured.term.kind, TerminationKind::Exited);
    assert_eq!(captured.term.code, 21);
    assert_eq!(captured.stdout, b"before failure");
}
