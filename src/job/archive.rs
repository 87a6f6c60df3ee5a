// src/job/archive.rs

use crate::errors::{ProviderError, Result};

/// Return the bare file name of an archive URL or path: everything after the
/// last `/`, or the whole input when it contains none.
///
/// Only empty input is rejected. A trailing `/` yields an empty name.
pub fn archive_file_name(location: &str) -> Result<&str> {
    if location.is_empty() {
        return Err(ProviderError::FormatError(
            "archive location is empty".to_string(),
        ));
    }

    Ok(location.rsplit('/').next().unwrap_or(location))
}
