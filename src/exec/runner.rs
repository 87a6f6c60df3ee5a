// src/exec/runner.rs

//! Run one Hadoop job: spawn, drain, wait, join, report.

use std::future::{self, Future};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::errors::{ProviderError, Result};
use crate::exec::command::{CommandTemplate, JobCommand};
use crate::exec::drain::{create_sink, spawn_drain, DrainSummary};
use crate::exec::observer::{RunObserver, StreamKind, TracingObserver};
use crate::job::JobSpec;

/// How long drains may keep reading after an interrupted child is killed.
/// Processes the job forked can hold the pipes open past that.
pub const INTERRUPT_DRAIN_GRACE: Duration = Duration::from_secs(1);

/// Outcome of a run that reached process exit.
///
/// A non-zero `exit_code` is still a completed run; the caller decides
/// whether it means failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// `-1` if the process was terminated by a signal.
    pub exit_code: i32,
    pub stdout: DrainSummary,
    pub stderr: DrainSummary,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn drains_completed(&self) -> bool {
        self.stdout.completed && self.stderr.completed
    }
}

/// Launches the external job and captures its output.
///
/// Holds only its command template and observer; every call to
/// [`run`](Self::run) is an independent one-shot run.
#[derive(Clone)]
pub struct ExternalJobRunner {
    template: CommandTemplate,
    observer: Arc<dyn RunObserver>,
}

impl std::fmt::Debug for ExternalJobRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExternalJobRunner")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl ExternalJobRunner {
    pub fn new(template: CommandTemplate, observer: Arc<dyn RunObserver>) -> Self {
        Self { template, observer }
    }

    /// Runner reporting through [`TracingObserver`].
    pub fn with_tracing(template: CommandTemplate) -> Self {
        Self::new(template, Arc::new(TracingObserver))
    }

    pub fn template(&self) -> &CommandTemplate {
        &self.template
    }

    /// Run `spec` to completion. There is no timeout.
    pub async fn run(&self, spec: &JobSpec) -> Result<RunResult> {
        self.run_until(spec, future::pending()).await
    }

    /// Run `spec`, giving up with [`ProviderError::InterruptedError`] if
    /// `interrupt` resolves before the process exits.
    ///
    /// On interruption the child is killed and the drains get
    /// [`INTERRUPT_DRAIN_GRACE`] to reach end of stream before they are told
    /// to stop. Either way they are joined and the capture files hold only
    /// whole lines. Dropping the returned future also kills the child.
    pub async fn run_until<F>(&self, spec: &JobSpec, interrupt: F) -> Result<RunResult>
    where
        F: Future<Output = ()>,
    {
        if spec.stdout_path() == spec.stderr_path() {
            return Err(ProviderError::ConfigError(format!(
                "stdout and stderr must be captured to different files (both {:?})",
                spec.stdout_path()
            )));
        }

        let command = self.template.build(spec)?;
        self.observer.command_built(&command);

        // Sinks exist before the process starts, even if it never writes.
        let stdout_sink = create_sink(spec.stdout_path()).await?;
        let stderr_sink = create_sink(spec.stderr_path()).await?;

        let mut cmd = command.to_command();
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.observer.start_failed(&command, &e);
                return Err(ProviderError::ProcessStartError {
                    command: command.to_string(),
                    source: e,
                });
            }
        };
        self.observer.process_started(&command, child.id());

        let (stop_tx, stop_rx) = watch::channel(false);
        let stdout_task = child.stdout.take().map(|out| {
            let observer = Arc::clone(&self.observer);
            spawn_drain(StreamKind::Stdout, out, stdout_sink, observer, stop_rx.clone())
        });
        let stderr_task = child.stderr.take().map(|err| {
            let observer = Arc::clone(&self.observer);
            spawn_drain(StreamKind::Stderr, err, stderr_sink, observer, stop_rx)
        });

        tokio::pin!(interrupt);
        let waited = tokio::select! {
            status = child.wait() => Some(status),
            () = &mut interrupt => None,
        };

        let status = match waited {
            Some(status) => status,
            None => {
                self.observer.interrupted(&command);
                if let Err(e) = child.kill().await {
                    self.observer.kill_failed(&command, &e);
                }

                let joined = self.join_drains(stdout_task, stderr_task);
                tokio::pin!(joined);
                if timeout(INTERRUPT_DRAIN_GRACE, &mut joined).await.is_err() {
                    let _ = stop_tx.send(true);
                    joined.await;
                }
                return Err(ProviderError::InterruptedError {
                    command: command.to_string(),
                });
            }
        };

        let (stdout, stderr) = self.join_drains(stdout_task, stderr_task).await;
        let status = status?;

        let exit_code = status.code().unwrap_or(-1);
        self.observer.process_exited(exit_code);
        if exit_code != 0 {
            self.observer.nonzero_exit(exit_code);
        }

        Ok(RunResult {
            exit_code,
            stdout,
            stderr,
        })
    }

    async fn join_drains(
        &self,
        stdout_task: Option<JoinHandle<DrainSummary>>,
        stderr_task: Option<JoinHandle<DrainSummary>>,
    ) -> (DrainSummary, DrainSummary) {
        tokio::join!(
            self.join_drain(StreamKind::Stdout, stdout_task),
            self.join_drain(StreamKind::Stderr, stderr_task),
        )
    }

    async fn join_drain(
        &self,
        stream: StreamKind,
        task: Option<JoinHandle<DrainSummary>>,
    ) -> DrainSummary {
        let Some(task) = task else {
            return DrainSummary::failed(stream);
        };
        match task.await {
            Ok(summary) => summary,
            Err(e) => {
                self.observer.drain_failed(stream, &e);
                DrainSummary::failed(stream)
            }
        }
    }
}
