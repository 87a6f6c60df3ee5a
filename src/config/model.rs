// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::Result;
use crate::exec::command::{CommandTemplate, DEFAULT_PROGRAM};
use crate::job::{JobSpec, DEFAULT_PACKAGE_EXTENSION};

/// Job file as read from TOML, before validation.
///
/// ```toml
/// [runner]
/// program = "hadoop"
/// package_extension = ".jar"
///
/// [job]
/// executable = "http://host/wordcount.jar::org.example.WordCount"
/// input_dir = "/data/in"
/// output_dir = "/data/out"
/// stdout = "logs/wordcount.stdout"
/// stderr = "logs/wordcount.stderr"
/// ```
///
/// `[runner]` is optional; `[job]` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub runner: RunnerSection,

    pub job: JobSection,
}

/// `[runner]` section: how the external command is launched.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    /// Program to execute; `hadoop` unless overridden.
    #[serde(default = "default_program")]
    pub program: String,

    /// Extension the archive part of `executable` must end with.
    #[serde(default = "default_package_extension")]
    pub package_extension: String,

    /// Directory the job is launched from. The archive must be available
    /// there under its bare file name.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

fn default_package_extension() -> String {
    DEFAULT_PACKAGE_EXTENSION.to_string()
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            package_extension: default_package_extension(),
            working_dir: None,
        }
    }
}

/// `[job]` section: one job invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSection {
    /// `archive::entryPoint`.
    pub executable: String,
    pub input_dir: String,
    pub output_dir: String,
    /// Capture file for the job's standard output.
    pub stdout: PathBuf,
    /// Capture file for the job's standard error.
    pub stderr: PathBuf,
}

/// A validated job file.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub runner: RunnerSection,
    pub job: JobSection,
}

impl ConfigFile {
    /// Build without validation. Prefer `ConfigFile::try_from(raw)`.
    pub(crate) fn new_unchecked(runner: RunnerSection, job: JobSection) -> Self {
        Self { runner, job }
    }

    pub fn command_template(&self) -> CommandTemplate {
        let template = CommandTemplate::new(&self.runner.program);
        match &self.runner.working_dir {
            Some(dir) => template.with_working_dir(dir),
            None => template,
        }
    }

    pub fn job_spec(&self) -> Result<JobSpec> {
        JobSpec::from_executable(
            &self.job.executable,
            &self.runner.package_extension,
            self.job.input_dir.as_str(),
            self.job.output_dir.as_str(),
            self.job.stdout.as_path(),
            self.job.stderr.as_path(),
        )
    }
}
