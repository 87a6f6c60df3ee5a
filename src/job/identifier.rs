// src/job/identifier.rs

use std::fmt;
use std::str::FromStr;

use crate::errors::{ProviderError, Result};

/// Literal separator between the archive location and the entry point.
pub const SEPARATOR: &str = "::";

/// Extension the archive location must end with unless configured otherwise.
pub const DEFAULT_PACKAGE_EXTENSION: &str = ".jar";

/// A parsed `archive::entryPoint` executable string.
///
/// Parsing is strict: no whitespace trimming, no case folding of the
/// extension, and exactly one separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableIdentifier {
    pub archive_location: String,
    pub entry_point: String,
}

impl ExecutableIdentifier {
    /// Parse using [`DEFAULT_PACKAGE_EXTENSION`].
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_extension(input, DEFAULT_PACKAGE_EXTENSION)
    }

    /// Parse, requiring the archive part to end with `extension`.
    pub fn parse_with_extension(input: &str, extension: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(ProviderError::FormatError(
                "executable info not available".to_string(),
            ));
        }

        let parts: Vec<&str> = input.split(SEPARATOR).collect();
        let [archive, entry] = parts.as_slice() else {
            return Err(ProviderError::FormatError(format!(
                "invalid executable info '{input}'; required [archive]{SEPARATOR}[entry-point]"
            )));
        };

        if archive.is_empty() {
            return Err(ProviderError::FormatError(format!(
                "archive location is empty in '{input}'"
            )));
        }
        if entry.is_empty() {
            return Err(ProviderError::FormatError(format!(
                "entry point is empty in '{input}'"
            )));
        }
        if !archive.ends_with(extension) {
            return Err(ProviderError::FormatError(format!(
                "archive location '{archive}' does not end with '{extension}'"
            )));
        }

        Ok(Self {
            archive_location: archive.to_string(),
            entry_point: entry.to_string(),
        })
    }

    pub fn into_parts(self) -> (String, String) {
        (self.archive_location, self.entry_point)
    }
}

impl FromStr for ExecutableIdentifier {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ExecutableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.archive_location, SEPARATOR, self.entry_point)
    }
}
