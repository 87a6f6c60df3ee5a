// src/exec/command.rs

use std::fmt;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::errors::Result;
use crate::job::{archive_file_name, JobSpec};

/// Program launched when the configuration does not override it.
pub const DEFAULT_PROGRAM: &str = "hadoop";

/// Subcommand that runs a MapReduce archive.
pub const JAR_SUBCOMMAND: &str = "jar";

/// How a job spec is turned into a command line.
///
/// Produces `<program> jar <jarFileName> <entryPoint> <inputDir> <outputDir>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub program: String,
    pub working_dir: Option<PathBuf>,
}

impl Default for CommandTemplate {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            working_dir: None,
        }
    }
}

impl CommandTemplate {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Fill in the template for `spec`.
    ///
    /// The archive is referenced by its bare file name; arguments are kept
    /// as separate argv entries and never pass through a shell.
    pub fn build(&self, spec: &JobSpec) -> Result<JobCommand> {
        let jar_name = archive_file_name(spec.archive_location())?;

        Ok(JobCommand {
            program: self.program.clone(),
            args: vec![
                JAR_SUBCOMMAND.to_string(),
                jar_name.to_string(),
                spec.entry_point().to_string(),
                spec.input_dir().to_string(),
                spec.output_dir().to_string(),
            ],
            working_dir: self.working_dir.clone(),
        })
    }
}

/// A fully resolved command ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCommand {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl JobCommand {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// A `tokio` command with program, args and working directory applied.
    /// Stdio is left for the caller to configure.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// Space-joined form, for logs and dry runs only.
impl fmt::Display for JobCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(archive: &str, input: &str) -> JobSpec {
        JobSpec::new(archive, "org.example.Main", input, "/data/out", "o", "e")
    }

    #[test]
    fn renders_hadoop_jar_command() {
        let cmd = CommandTemplate::default()
            .build(&spec("http://host/app.jar", "/data/in"))
            .unwrap();

        assert_eq!(
            cmd.to_string(),
            "hadoop jar app.jar org.example.Main /data/in /data/out"
        );
        assert_eq!(cmd.program(), "hadoop");
        assert_eq!(cmd.args().len(), 5);
    }

    #[test]
    fn arguments_stay_separate() {
        let cmd = CommandTemplate::default()
            .build(&spec("app.jar", "/data/my input; rm -rf /"))
            .unwrap();

        assert_eq!(cmd.args()[3], "/data/my input; rm -rf /");
    }

    #[test]
    fn custom_program_and_working_dir() {
        let cmd = CommandTemplate::new("/usr/local/hadoop/bin/hadoop")
            .with_working_dir("/opt/jobs")
            .build(&spec("/opt/jobs/app.jar", "in"))
            .unwrap();

        assert_eq!(cmd.program(), "/usr/local/hadoop/bin/hadoop");
        assert_eq!(cmd.working_dir(), Some(Path::new("/opt/jobs")));
        assert_eq!(cmd.args()[1], "app.jar");
    }

    #[test]
    fn empty_archive_fails() {
        assert!(CommandTemplate::default().build(&spec("", "in")).is_err());
    }
}
