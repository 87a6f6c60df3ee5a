use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hadoop_provider::exec::CommandTemplate;
use tempfile::TempDir;

/// A stand-in for the `hadoop` command line backed by a shell script.
///
/// The runner always passes `jar` as the first argument, so the script is
/// saved as `<dir>/jar` and the template runs `sh` from `<dir>`:
/// `sh jar <jarFileName> <entryPoint> <inputDir> <outputDir>`.
/// Inside the script `$1..$4` are the four job arguments.
///
/// Running through `sh` avoids needing an executable bit on a freshly
/// written file.
pub struct FakeHadoop {
    dir: TempDir,
}

impl FakeHadoop {
    pub fn new(script: &str) -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("jar"), script)?;
        Ok(Self { dir })
    }

    /// Script that prints its arguments on stdout and exits 0.
    pub fn echo_args() -> io::Result<Self> {
        Self::new("echo \"$@\"\n")
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Scratch path inside the fake's directory, handy for capture files.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn template(&self) -> CommandTemplate {
        CommandTemplate::new("sh").with_working_dir(self.dir.path())
    }
}
