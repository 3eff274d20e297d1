//! Run report types
//!
//! Provides structures for tracking what a run checked and changed.

use super::FetchResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single rewritten manifest line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChange {
    /// 0-based line number in the manifest
    pub line_index: usize,
    /// Package whose pin changed
    pub package: String,
    /// Line before the change, without terminator
    pub old_line: String,
    /// Line after the change, without terminator
    pub new_line: String,
}

/// Outcome of one run over a manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Path to the manifest file
    pub manifest: PathBuf,
    /// One result per requirement, in manifest order
    pub results: Vec<FetchResult>,
    /// Lines rewritten (or that would be, in dry-run mode)
    pub changes: Vec<LineChange>,
    /// Backup written before the manifest was replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<PathBuf>,
    /// Whether the manifest was actually replaced
    pub written: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl RunReport {
    /// Creates an empty report for a manifest
    pub fn new(manifest: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            manifest: manifest.into(),
            results: Vec::new(),
            changes: Vec::new(),
            backup: None,
            written: false,
            dry_run,
        }
    }

    /// Returns the number of requirements checked
    pub fn total_requirements(&self) -> usize {
        self.results.len()
    }

    /// Returns the number of requirements approved for a bump
    pub fn update_count(&self) -> usize {
        self.results.iter().filter(|r| r.should_update).count()
    }

    /// Returns the number of requirements left untouched
    pub fn skip_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_skip()).count()
    }

    /// Returns all results approved for a bump
    pub fn updates(&self) -> impl Iterator<Item = &FetchResult> {
        self.results.iter().filter(|r| r.should_update)
    }

    /// Returns all skipped results
    pub fn skips(&self) -> impl Iterator<Item = &FetchResult> {
        self.results.iter().filter(|r| r.is_skip())
    }

    /// Returns true if any line changed (or would change)
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Requirement, SkipReason, VersionOperator};

    fn pinned(name: &str, line_index: usize) -> Requirement {
        Requirement::pinned(
            line_index,
            name,
            VersionOperator::Exact,
            "1.0.0",
            format!("{}==1.0.0", name),
        )
    }

    #[test]
    fn test_run_report_new() {
        let report = RunReport::new("requirements.txt", true);
        assert_eq!(report.manifest, PathBuf::from("requirements.txt"));
        assert!(report.results.is_empty());
        assert!(report.changes.is_empty());
        assert!(report.backup.is_none());
        assert!(!report.written);
        assert!(report.dry_run);
    }

    #[test]
    fn test_run_report_counts() {
        let mut report = RunReport::new("requirements.txt", false);
        report.results.push(FetchResult::update(pinned("a", 0), "2.0.0"));
        report.results.push(FetchResult::skip(
            pinned("b", 1),
            Some("1.0.0".to_string()),
            SkipReason::AlreadyLatest,
        ));
        report.results.push(FetchResult::fetch_failed(pinned("c", 2), "timeout"));

        assert_eq!(report.total_requirements(), 3);
        assert_eq!(report.update_count(), 1);
        assert_eq!(report.skip_count(), 2);
        assert_eq!(report.updates().count(), 1);
        assert_eq!(report.skips().count(), 2);
        assert!(!report.has_changes());
    }

    #[test]
    fn test_run_report_has_changes() {
        let mut report = RunReport::new("requirements.txt", false);
        report.changes.push(LineChange {
            line_index: 0,
            package: "a".to_string(),
            old_line: "a==1.0.0".to_string(),
            new_line: "a==2.0.0".to_string(),
        });
        assert!(report.has_changes());
    }

    #[test]
    fn test_serde_run_report() {
        let mut report = RunReport::new("requirements.txt", false);
        report.results.push(FetchResult::update(pinned("a", 0), "2.0.0"));
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("\"backup\""));
        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
