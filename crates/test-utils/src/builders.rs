#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hadoop_provider::job::JobSpec;

/// Builder for `JobSpec` with sensible test defaults.
pub struct JobSpecBuilder {
    archive: String,
    entry_point: String,
    input_dir: String,
    output_dir: String,
    stdout: PathBuf,
    stderr: PathBuf,
}

impl JobSpecBuilder {
    /// Defaults to `http://host/app.jar::org.example.Main`, reading
    /// `/data/in` and writing `/data/out`, capturing into `dir`.
    pub fn new(dir: &Path) -> Self {
        Self {
            archive: "http://host/app.jar".to_string(),
            entry_point: "org.example.Main".to_string(),
            input_dir: "/data/in".to_string(),
            output_dir: "/data/out".to_string(),
            stdout: dir.join("job.stdout"),
            stderr: dir.join("job.stderr"),
        }
    }

    pub fn archive(mut self, archive: &str) -> Self {
        self.archive = archive.to_string();
        self
    }

    pub fn entry_point(mut self, entry_point: &str) -> Self {
        self.entry_point = entry_point.to_string();
        self
    }

    pub fn input_dir(mut self, dir: &str) -> Self {
        self.input_dir = dir.to_string();
        self
    }

    pub fn output_dir(mut self, dir: &str) -> Self {
        self.output_dir = dir.to_string();
        self
    }

    pub fn stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = path.into();
        self
    }

    pub fn stderr(mut self, path: impl Into<PathBuf>) -> Self {
        self.stderr = path.into();
        self
    }

    pub fn build(self) -> JobSpec {
        JobSpec::new(
            self.archive,
            self.entry_point,
            self.input_dir,
            self.output_dir,
            self.stdout,
            self.stderr,
        )
    }
}
