// src/exec/observer.rs

//! Observability seam for job runs.
//!
//! The runner never logs directly; it reports to a `RunObserver` handed to it
//! at construction. Production code uses [`TracingObserver`], tests can pass
//! a recording fake.

use std::error::Error;
use std::fmt;

use tracing::{debug, error, info, warn};

use crate::exec::command::JobCommand;

/// Which child stream a drain task is copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives every event of a run.
///
/// Shared between the runner and both drain tasks, so implementations must
/// be `Send + Sync`.
pub trait RunObserver: Send + Sync {
    fn command_built(&self, command: &JobCommand);
    fn process_started(&self, command: &JobCommand, pid: Option<u32>);
    /// One captured line, without its terminator.
    fn line(&self, stream: StreamKind, line: &str);
    /// The copy loop of a drain task stopped on an error.
    fn drain_failed(&self, stream: StreamKind, error: &dyn Error);
    /// Flushing or releasing a sink failed after the copy loop ended.
    fn sink_close_failed(&self, stream: StreamKind, error: &dyn Error);
    fn process_exited(&self, exit_code: i32);
    /// Emitted once per run, only when the exit code is not zero.
    fn nonzero_exit(&self, exit_code: i32);
    fn start_failed(&self, command: &JobCommand, error: &dyn Error);
    fn interrupted(&self, command: &JobCommand);
    fn kill_failed(&self, command: &JobCommand, error: &dyn Error);
}

/// Default observer: forwards everything to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn command_built(&self, command: &JobCommand) {
        info!(cmd = %command, "built hadoop command");
    }

    fn process_started(&self, command: &JobCommand, pid: Option<u32>) {
        info!(cmd = %command, ?pid, "started hadoop process");
    }

    fn line(&self, stream: StreamKind, line: &str) {
        debug!(stream = %stream, "{}", line);
    }

    fn drain_failed(&self, stream: StreamKind, error: &dyn Error) {
        warn!(stream = %stream, error = %error, "stream capture stopped early");
    }

    fn sink_close_failed(&self, stream: StreamKind, error: &dyn Error) {
        warn!(stream = %stream, error = %error, "failed to close capture file");
    }

    fn process_exited(&self, exit_code: i32) {
        info!(exit_code, success = exit_code == 0, "hadoop process exited");
    }

    fn nonzero_exit(&self, exit_code: i32) {
        // Hadoop exit codes are not reliable; the caller decides what to do.
        warn!(exit_code, "hadoop process exited with non-zero code");
    }

    fn start_failed(&self, command: &JobCommand, error: &dyn Error) {
        error!(cmd = %command, error = %error, "IO error during hadoop jar execution");
    }

    fn interrupted(&self, command: &JobCommand) {
        error!(cmd = %command, "hadoop job interrupted; killing process");
    }

    fn kill_failed(&self, command: &JobCommand, error: &dyn Error) {
        warn!(cmd = %command, error = %error, "failed to kill hadoop process");
    }
}
