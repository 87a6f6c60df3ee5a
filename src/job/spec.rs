// src/job/spec.rs

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::job::identifier::ExecutableIdentifier;

/// Everything needed to invoke one external job run.
///
/// The archive is expected to be available locally under its bare file name
/// (relative to the runner's working directory) before the run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    archive_location: String,
    entry_point: String,
    input_dir: String,
    output_dir: String,
    stdout_path: PathBuf,
    stderr_path: PathBuf,
}

impl JobSpec {
    pub fn new(
        archive_location: impl Into<String>,
        entry_point: impl Into<String>,
        input_dir: impl Into<String>,
        output_dir: impl Into<String>,
        stdout_path: impl Into<PathBuf>,
        stderr_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            archive_location: archive_location.into(),
            entry_point: entry_point.into(),
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            stdout_path: stdout_path.into(),
            stderr_path: stderr_path.into(),
        }
    }

    /// Build a spec from an `archive::entryPoint` string.
    pub fn from_executable(
        executable: &str,
        package_extension: &str,
        input_dir: impl Into<String>,
        output_dir: impl Into<String>,
        stdout_path: impl Into<PathBuf>,
        stderr_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let (archive, entry) =
            ExecutableIdentifier::parse_with_extension(executable, package_extension)?.into_parts();
        Ok(Self::new(
            archive,
            entry,
            input_dir,
            output_dir,
            stdout_path,
            stderr_path,
        ))
    }

    pub fn archive_location(&self) -> &str {
        &self.archive_location
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn input_dir(&self) -> &str {
        &self.input_dir
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn stdout_path(&self) -> &Path {
        &self.stdout_path
    }

    pub fn stderr_path(&self) -> &Path {
        &self.stderr_path
    }
}
