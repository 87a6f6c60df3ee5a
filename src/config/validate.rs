// src/config/validate.rs

use crate::config::model::{ConfigFile, JobSection, RawConfigFile, RunnerSection};
use crate::errors::{ProviderError, Result};
use crate::job::ExecutableIdentifier;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ProviderError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.runner, raw.job))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_runner(&cfg.runner)?;
    validate_job(&cfg.job, &cfg.runner.package_extension)?;
    Ok(())
}

fn validate_runner(runner: &RunnerSection) -> Result<()> {
    if runner.program.is_empty() {
        return Err(config_error("[runner].program must not be empty"));
    }
    if runner.package_extension.is_empty() {
        return Err(config_error("[runner].package_extension must not be empty"));
    }
    Ok(())
}

fn validate_job(job: &JobSection, package_extension: &str) -> Result<()> {
    // Surfaces as FormatError, same as at run time.
    ExecutableIdentifier::parse_with_extension(&job.executable, package_extension)?;

    for (field, value) in [
        ("input_dir", job.input_dir.as_str()),
        ("output_dir", job.output_dir.as_str()),
    ] {
        if value.is_empty() {
            return Err(config_error(&format!("[job].{field} must not be empty")));
        }
    }

    if job.stdout.as_os_str().is_empty() || job.stderr.as_os_str().is_empty() {
        return Err(config_error("[job].stdout and [job].stderr must not be empty"));
    }
    if job.stdout == job.stderr {
        return Err(config_error(&format!(
            "[job].stdout and [job].stderr must be different files (both {:?})",
            job.stdout
        )));
    }

    Ok(())
}

fn config_error(msg: &str) -> ProviderError {
    ProviderError::ConfigError(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(toml_src: &str) -> RawConfigFile {
        toml::from_str(toml_src).unwrap()
    }

    const VALID: &str = r#"
[job]
executable = "http://host/app.jar::org.example.Main"
input_dir = "/data/in"
output_dir = "/data/out"
stdout = "out.txt"
stderr = "err.txt"
"#;

    #[test]
    fn runner_section_defaults() {
        let cfg = ConfigFile::try_from(raw(VALID)).unwrap();
        assert_eq!(cfg.runner.program, "hadoop");
        assert_eq!(cfg.runner.package_extension, ".jar");
        assert!(cfg.runner.working_dir.is_none());
        assert_eq!(
            cfg.command_template().build(&cfg.job_spec().unwrap()).unwrap().to_string(),
            "hadoop jar app.jar org.example.Main /data/in /data/out"
        );
    }

    #[test]
    fn same_sink_for_both_streams_is_rejected() {
        let src = VALID.replace("err.txt", "out.txt");
        match ConfigFile::try_from(raw(&src)) {
            Err(ProviderError::ConfigError(msg)) => assert!(msg.contains("different files")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn bad_executable_is_format_error() {
        let src = VALID.replace("app.jar::", "app.zip::");
        assert!(matches!(
            ConfigFile::try_from(raw(&src)),
            Err(ProviderError::FormatError(_))
        ));
    }

    #[test]
    fn empty_program_is_rejected() {
        let src = format!("[runner]\nprogram = \"\"\n{VALID}");
        assert!(matches!(
            ConfigFile::try_from(raw(&src)),
            Err(ProviderError::ConfigError(_))
        ));
    }

    #[test]
    fn custom_extension_applies_to_executable() {
        let src = format!(
            "[runner]\npackage_extension = \".zip\"\n{}",
            VALID.replace("app.jar::", "app.zip::")
        );
        let cfg = ConfigFile::try_from(raw(&src)).unwrap();
        assert_eq!(cfg.job_spec().unwrap().archive_location(), "http://host/app.zip");
    }
}
