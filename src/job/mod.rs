// src/job/mod.rs

//! Job description types.
//!
//! - [`identifier`] parses `archive::entryPoint` executable strings.
//! - [`archive`] derives the bare archive file name from a URL or path.
//! - [`spec`] holds the immutable [`JobSpec`] for one invocation.

pub mod archive;
pub mod identifier;
pub mod spec;

pub use archive::archive_file_name;
pub use identifier::{ExecutableIdentifier, DEFAULT_PACKAGE_EXTENSION, SEPARATOR};
pub use spec::JobSpec;
