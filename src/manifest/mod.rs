//! Requirements file reading, parsing and rewriting
//!
//! This module provides functionality to:
//! - Read the manifest once, before any network activity
//! - Parse requirement entries from requirements.txt content
//! - Rewrite pins in place with an optional backup

mod parser;
mod writer;

pub use parser::{is_ignorable, parse_line, parse_requirements};
pub use writer::{
    backup_path, rewrite, write_backup, write_manifest, ManifestWriter, Rewrite, WriteOutcome,
    BACKUP_SUFFIX,
};

use crate::error::ManifestError;
use std::io::ErrorKind;
use std::path::Path;

/// Default manifest file name
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Read a manifest file
///
/// A missing file is reported as `NotFound`; any other failure, including a
/// path that is a directory or content that is not UTF-8, as `ReadError`.
pub fn read_manifest(path: &Path) -> Result<String, ManifestError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ManifestError::not_found(path),
        _ => ManifestError::read_error(path, e),
    })
}
