//! Manifest rewriting and update operations
//!
//! This module provides:
//! - Line-preserving rewrite of requirement pins
//! - Byte-for-byte backup before the manifest is touched
//! - Whole-file replacement through a temporary file in the same directory
//! - Dry-run mode support (no actual file modifications)

use crate::domain::{LineChange, Requirement, UpdateSet};
use crate::error::ManifestError;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix appended to the manifest path for the backup copy
pub const BACKUP_SUFFIX: &str = ".bak";

/// Writer that applies version updates to a requirements file
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    /// Whether to copy the manifest to `<manifest>.bak` before replacing it
    backup: bool,
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// New manifest content together with the lines that changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Full manifest content after the rewrite
    pub content: String,
    /// Changed lines, in file order
    pub changes: Vec<LineChange>,
}

/// Result of applying updates to the manifest file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Lines that changed (or would change, in dry-run mode)
    pub changes: Vec<LineChange>,
    /// Backup path, if a backup was written
    pub backup: Option<PathBuf>,
    /// Whether the manifest was actually replaced
    pub file_modified: bool,
}

impl WriteOutcome {
    fn unchanged(changes: Vec<LineChange>) -> Self {
        Self {
            changes,
            backup: None,
            file_modified: false,
        }
    }
}

/// Returns the backup path for a manifest (`requirements.txt` → `requirements.txt.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Splits a raw line into body and terminator (`\n`, `\r\n` or nothing)
fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Rewrites the pins of updated packages, passing every other line through
///
/// A line is rewritten only when the update set approves its index and a
/// requirement parsed from that index still matches the stripped text.
/// Other lines naming the same package stay as they are. Indentation,
/// trailing whitespace and line terminators are preserved.
pub fn rewrite(content: &str, requirements: &[Requirement], updates: &UpdateSet) -> Rewrite {
    let by_line: HashMap<usize, &Requirement> = requirements
        .iter()
        .map(|req| (req.line_index, req))
        .collect();

    let mut output = String::with_capacity(content.len());
    let mut changes = Vec::new();

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let (body, terminator) = split_terminator(line);
        let stripped = body.trim();

        let target = by_line
            .get(&index)
            .filter(|req| updates.approves_line(index) && req.raw_line == stripped)
            .and_then(|req| updates.get(&req.name).map(|version| (*req, version)));

        let Some((req, new_version)) = target else {
            output.push_str(line);
            continue;
        };

        let leading = &body[..body.len() - body.trim_start().len()];
        let trailing = &body[body.trim_end().len()..];
        let new_body = format!("{}{}{}", leading, req.updated_line(new_version), trailing);

        if new_body != body {
            changes.push(LineChange {
                line_index: index,
                package: req.name.clone(),
                old_line: body.to_string(),
                new_line: new_body.clone(),
            });
        }

        output.push_str(&new_body);
        output.push_str(terminator);
    }

    Rewrite {
        content: output,
        changes,
    }
}

impl ManifestWriter {
    /// Create a new ManifestWriter
    pub fn new(backup: bool, dry_run: bool) -> Self {
        Self { backup, dry_run }
    }

    /// Create a ManifestWriter in dry-run mode
    pub fn dry_run() -> Self {
        Self {
            backup: false,
            dry_run: true,
        }
    }

    /// Check if this writer is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Check if this writer creates a backup
    pub fn creates_backup(&self) -> bool {
        self.backup
    }

    /// Apply the update set to the manifest at `path`
    ///
    /// `content` must be the text the requirements were parsed from. Nothing
    /// is written when there are no changes or in dry-run mode. When a backup
    /// is requested and cannot be written, the manifest is left untouched.
    pub fn apply(
        &self,
        path: &Path,
        content: &str,
        requirements: &[Requirement],
        updates: &UpdateSet,
    ) -> Result<WriteOutcome, ManifestError> {
        let rewrite = rewrite(content, requirements, updates);

        if rewrite.changes.is_empty() {
            debug!("no lines to rewrite in {}", path.display());
            return Ok(WriteOutcome::unchanged(rewrite.changes));
        }

        if self.dry_run {
            debug!(
                "dry run: {} line(s) would change in {}",
                rewrite.changes.len(),
                path.display()
            );
            return Ok(WriteOutcome::unchanged(rewrite.changes));
        }

        let backup = if self.backup {
            Some(write_backup(path)?)
        } else {
            None
        };

        write_manifest(path, &rewrite.content)?;
        info!(
            "updated {} line(s) in {}",
            rewrite.changes.len(),
            path.display()
        );

        Ok(WriteOutcome {
            changes: rewrite.changes,
            backup,
            file_modified: true,
        })
    }
}

/// Copy the manifest byte-for-byte to `<manifest>.bak`
pub fn write_backup(path: &Path) -> Result<PathBuf, ManifestError> {
    let backup = backup_path(path);
    fs::copy(path, &backup).map_err(|e| ManifestError::backup_error(&backup, e))?;
    info!("backup written to {}", backup.display());
    Ok(backup)
}

/// Replace the manifest content in one step
///
/// The content goes to a temporary file next to the manifest which is then
/// renamed over it, so readers see either the old or the new file. A
/// symlinked manifest is resolved first and its target is replaced, leaving
/// the link in place.
pub fn write_manifest(path: &Path, content: &str) -> Result<(), ManifestError> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| ManifestError::write_error(path, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| ManifestError::write_error(path, e))?;

    if let Ok(metadata) = fs::metadata(&target) {
        if let Err(e) = fs::set_permissions(temp.path(), metadata.permissions()) {
            debug!(
                "could not copy permissions of {}: {}",
                target.display(),
                e
            );
        }
    }

    temp.persist(&target)
        .map_err(|e| ManifestError::write_error(path, e.error))?;
    Ok(())
}
