// src/exec/mod.rs

//! Process execution layer.
//!
//! This module turns a [`JobSpec`](crate::job::JobSpec) into a running
//! `tokio::process::Command`, drains its output into the capture files and
//! reports what happened through a [`RunObserver`].
//!
//! - [`command`] builds the argument vector from a [`CommandTemplate`].
//! - [`drain`] copies one child stream into one sink file, line by line.
//! - [`observer`] defines the observability seam and its `tracing` default.
//! - [`runner`] owns a single run: spawn, drain, wait, join, report.

pub mod command;
pub mod drain;
pub mod observer;
pub mod runner;

pub use command::{CommandTemplate, JobCommand};
pub use drain::DrainSummary;
pub use observer::{RunObserver, StreamKind, TracingObserver};
pub use runner::{ExternalJobRunner, RunResult};
