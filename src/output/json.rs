//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of a run report
//! - Every checked package, split into updates and skips

use crate::domain::{RunReport, SkipReason};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput {
    /// Path to the manifest file
    manifest: String,
    /// Whether this was a dry-run
    dry_run: bool,
    /// Whether the manifest was rewritten
    written: bool,
    /// Backup file, if one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    backup: Option<String>,
    /// Summary statistics
    summary: JsonSummary,
    /// Packages approved for a bump
    updates: Vec<JsonUpdate>,
    /// Packages left untouched
    skips: Vec<JsonSkip>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Number of requirements checked
    total: usize,
    /// Number of updates
    updates: usize,
    /// Number of skips
    skips: usize,
    /// Number of manifest lines changed (or that would change)
    changed_lines: usize,
}

/// JSON representation of an update
#[derive(Serialize)]
struct JsonUpdate {
    /// Package name
    name: String,
    /// Old version (absent for unpinned entries)
    from: Option<String>,
    /// New version
    to: String,
    /// 1-based line number in the manifest
    line: usize,
}

/// JSON representation of a skip
#[derive(Serialize)]
struct JsonSkip {
    /// Package name
    name: String,
    /// Current version
    version: Option<String>,
    /// Latest version, when the lookup succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<String>,
    /// Skip reason
    reason: String,
}

impl JsonFormatter {
    /// Convert skip reason to string
    fn skip_reason_to_string(reason: &SkipReason) -> String {
        match reason {
            SkipReason::AlreadyLatest => "already_latest".to_string(),
            SkipReason::FetchFailed(msg) => format!("fetch_failed: {}", msg),
            SkipReason::ParseError(msg) => format!("parse_error: {}", msg),
        }
    }

    fn to_json(report: &RunReport) -> JsonOutput {
        let updates = report
            .updates()
            .map(|result| JsonUpdate {
                name: result.package_name().to_string(),
                from: result.requirement.version().map(str::to_string),
                to: result.resolved_version.clone().unwrap_or_default(),
                line: result.requirement.line_index + 1,
            })
            .collect();

        let skips = report
            .skips()
            .map(|result| JsonSkip {
                name: result.package_name().to_string(),
                version: result.requirement.version().map(str::to_string),
                latest: result.resolved_version.clone(),
                reason: result
                    .skip_reason
                    .as_ref()
                    .map(Self::skip_reason_to_string)
                    .unwrap_or_default(),
            })
            .collect();

        JsonOutput {
            manifest: report.manifest.display().to_string(),
            dry_run: report.dry_run,
            written: report.written,
            backup: report.backup.as_ref().map(|b| b.display().to_string()),
            summary: JsonSummary {
                total: report.total_requirements(),
                updates: report.update_count(),
                skips: report.skip_count(),
                changed_lines: report.changes.len(),
            },
            updates,
            skips,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = Self::to_json(report);
        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
