// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod job;
pub mod logging;
pub mod provider;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, ConfigFile};
use crate::exec::{ExternalJobRunner, RunResult};
use crate::provider::{HadoopProvider, Interrupt, Provider, TracingNotifier};

/// High-level entry point used by `main.rs`.
///
/// Loads the job file, runs the job through [`HadoopProvider`] with Ctrl-C as
/// the interruption signal, and returns the process exit code to use.
pub async fn run(args: CliArgs) -> Result<i32> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(0);
    }

    let spec = cfg.job_spec()?;
    let runner = ExternalJobRunner::with_tracing(cfg.command_template());
    let provider = HadoopProvider::new(runner, Arc::new(TracingNotifier));

    provider.initialize()?;
    let outcome = provider.execute(&spec, ctrl_c_interrupt()).await;
    provider.dispose()?;
    let outcome = outcome?;

    print_summary(&cfg, &outcome.result);
    Ok(exit_code_for(&outcome.result, args.strict))
}

/// Ctrl-C as an [`Interrupt`]. If the signal handler cannot be installed the
/// interrupt never fires.
fn ctrl_c_interrupt() -> Interrupt {
    Box::pin(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C; run cannot be interrupted");
            std::future::pending::<()>().await;
        }
    })
}

/// Exit code the CLI reports for a completed run.
///
/// Without `strict` a completed run always exits 0; with it the job's own
/// exit code is passed through (signals map to 1).
pub fn exit_code_for(result: &RunResult, strict: bool) -> i32 {
    match (strict, result.exit_code) {
        (false, _) | (true, 0) => 0,
        (true, code) if code > 0 => code,
        (true, _) => 1,
    }
}

fn print_dry_run(cfg: &ConfigFile) -> Result<()> {
    let spec = cfg.job_spec()?;
    let command = cfg.command_template().build(&spec)?;

    println!("hadoop-provider dry-run");
    println!("  command: {command}");
    if let Some(dir) = &cfg.runner.working_dir {
        println!("  working_dir: {}", dir.display());
    }
    println!("  archive: {}", spec.archive_location());
    println!("  stdout -> {}", spec.stdout_path().display());
    println!("  stderr -> {}", spec.stderr_path().display());

    info!("dry-run complete (no execution)");
    Ok(())
}

fn print_summary(cfg: &ConfigFile, result: &RunResult) {
    println!("exit code: {}", result.exit_code);
    println!(
        "stdout: {} lines -> {}",
        result.stdout.lines,
        cfg.job.stdout.display()
    );
    println!(
        "stderr: {} lines -> {}",
        result.stderr.lines,
        cfg.job.stderr.display()
    );
    if !result.drains_completed() {
        println!("warning: output capture did not complete; see log for details");
    }
}
