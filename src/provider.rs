// src/provider.rs

//! Host framework adapter.
//!
//! The workflow host drives a provider through `initialize` → `execute` →
//! `dispose` and observes execution through a [`Notifier`]. `HadoopProvider`
//! is the thin adapter that places an [`ExternalJobRunner`] between the two
//! notifier hooks and hands the captured stdout back to the host, which maps
//! it onto its own typed output parameters.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::info;

use crate::errors::{ProviderError, Result};
use crate::exec::{ExternalJobRunner, RunResult};
use crate::job::JobSpec;

/// Resolves when the host wants the running job interrupted.
pub type Interrupt = Pin<Box<dyn Future<Output = ()> + Send>>;

/// An interrupt that never fires.
pub fn never_interrupt() -> Interrupt {
    Box::pin(std::future::pending())
}

/// Execution hooks exposed by the host framework.
pub trait Notifier: Send + Sync {
    /// Called before the command is built.
    fn start_execution(&self, spec: &JobSpec);
    /// Called after the run completed, whatever its exit code.
    fn finish_execution(&self, spec: &JobSpec, result: &RunResult);
}

/// Notifier that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn start_execution(&self, spec: &JobSpec) {
        info!(entry_point = %spec.entry_point(), "execution started");
    }

    fn finish_execution(&self, spec: &JobSpec, result: &RunResult) {
        info!(
            entry_point = %spec.entry_point(),
            exit_code = result.exit_code,
            "execution finished"
        );
    }
}

/// What `execute` hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub result: RunResult,
    /// Contents of the stdout capture file after the run.
    pub stdout: String,
}

/// Provider lifecycle as seen by the host framework.
pub trait Provider: Send + Sync {
    fn initialize(&self) -> Result<()>;

    fn execute<'a>(
        &'a self,
        spec: &'a JobSpec,
        interrupt: Interrupt,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>>;

    fn dispose(&self) -> Result<()>;
}

/// Runs MapReduce jobs through the `hadoop` command line.
pub struct HadoopProvider {
    runner: ExternalJobRunner,
    notifier: Arc<dyn Notifier>,
}

impl HadoopProvider {
    pub fn new(runner: ExternalJobRunner, notifier: Arc<dyn Notifier>) -> Self {
        Self { runner, notifier }
    }

    pub fn runner(&self) -> &ExternalJobRunner {
        &self.runner
    }
}

impl Provider for HadoopProvider {
    fn initialize(&self) -> Result<()> {
        // Hadoop is assumed configured and input data already in HDFS.
        info!("nothing to initialize for hadoop job");
        Ok(())
    }

    fn execute<'a>(
        &'a self,
        spec: &'a JobSpec,
        interrupt: Interrupt,
    ) -> Pin<Box<dyn Future<Output = Result<JobOutcome>> + Send + 'a>> {
        Box::pin(async move {
            self.notifier.start_execution(spec);

            let result = self
                .runner
                .run_until(spec, interrupt)
                .await
                .map_err(|e| ProviderError::ExecutionFailed(Box::new(e)))?;

            self.notifier.finish_execution(spec, &result);

            let stdout = tokio::fs::read_to_string(spec.stdout_path())
                .await
                .map_err(|e| ProviderError::OutputProcessingFailed(Box::new(ProviderError::from(e))))?;

            Ok(JobOutcome { result, stdout })
        })
    }

    fn dispose(&self) -> Result<()> {
        info!("nothing to dispose for hadoop job");
        Ok(())
    }
}
