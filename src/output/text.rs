//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Human-readable update list with colors
//! - Packages that could not be checked, with reasons
//! - Up-to-date packages and a summary line in verbose mode

use crate::domain::{FetchResult, RunReport, SkipReason};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Minimum column width for package names
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, report: &RunReport) -> String {
        if !report.dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Format a skip reason for display
    fn format_skip_reason(&self, reason: &SkipReason) -> String {
        match reason {
            SkipReason::AlreadyLatest => "latest".to_string(),
            SkipReason::FetchFailed(msg) => format!("fetch failed: {}", msg),
            SkipReason::ParseError(msg) => format!("parse error: {}", msg),
        }
    }

    /// Calculate the name column width for alignment
    fn name_width(&self, results: &[&FetchResult]) -> usize {
        results
            .iter()
            .map(|r| r.package_name().len())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH)
    }

    /// Format a single update line
    fn format_update_line(
        &self,
        result: &FetchResult,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let name = result.package_name();
        let old_version = result.requirement.version().unwrap_or("unpinned");
        let new_version = result.resolved_version.as_deref().unwrap_or("?");

        if self.color {
            let name_display = format!("{:width$}", name, width = width);
            writeln!(
                writer,
                "  {} {} {} {}",
                name_display,
                old_version.dimmed(),
                "→".dimmed(),
                new_version.bright_white().bold()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {}",
                name,
                old_version,
                new_version,
                width = width
            )
        }
    }

    /// Format a single skip line
    fn format_skip_line(
        &self,
        result: &FetchResult,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let reason = result
            .skip_reason
            .as_ref()
            .map(|r| self.format_skip_reason(r))
            .unwrap_or_default();
        let version = result.requirement.version().unwrap_or("unpinned");

        if self.color {
            let name_display = format!("{:width$}", result.package_name(), width = width);
            writeln!(
                writer,
                "  {} {} {}",
                name_display.dimmed(),
                version.dimmed(),
                format!("({})", reason).dimmed()
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} ({})",
                result.package_name(),
                version,
                reason,
                width = width
            )
        }
    }

    /// Write a section heading
    fn format_heading(&self, heading: &str, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.color {
            writeln!(writer, "{}", heading.yellow())
        } else {
            writeln!(writer, "{}", heading)
        }
    }

    /// Write the manifest header with counts
    fn format_header(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(report);
        let path_display = report.manifest.display().to_string();
        let update_count = report.update_count();
        let skip_count = report.skip_count();
        let update_word = if update_count == 1 { "update" } else { "updates" };
        let skip_word = if skip_count == 1 { "skip" } else { "skips" };

        if self.color {
            writeln!(
                writer,
                "{}{} — {} {}, {} {}",
                prefix,
                path_display.bold(),
                update_count.to_string().green(),
                update_word,
                skip_count.to_string().dimmed(),
                skip_word
            )
        } else {
            writeln!(
                writer,
                "{}{} — {} {}, {} {}",
                prefix, path_display, update_count, update_word, skip_count, skip_word
            )
        }
    }

    /// Write what happened to the file
    fn format_footer(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let lines = report.changes.len();
        let line_word = if lines == 1 { "line" } else { "lines" };

        if report.dry_run {
            if report.has_changes() {
                let message = format!(
                    "{} {} would change; no files written",
                    lines, line_word
                );
                if self.color {
                    writeln!(writer, "{}{}", self.dry_run_prefix(report), message.cyan())?;
                } else {
                    writeln!(writer, "{}{}", self.dry_run_prefix(report), message)?;
                }
            }
            return Ok(());
        }

        if report.written {
            if let Some(backup) = &report.backup {
                let message = format!("Backup written to {}", backup.display());
                if self.color {
                    writeln!(writer, "{}", message.blue())?;
                } else {
                    writeln!(writer, "{}", message)?;
                }
            }
            let message = format!(
                "Updated {} {} in {}",
                lines,
                line_word,
                report.manifest.display()
            );
            if self.color {
                writeln!(writer, "{}", message.green())?;
            } else {
                writeln!(writer, "{}", message)?;
            }
        }

        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if report.total_requirements() == 0 {
            let message = format!("No requirements found in {}", report.manifest.display());
            if self.color {
                writeln!(writer, "{}", message.yellow())?;
            } else {
                writeln!(writer, "{}", message)?;
            }
            return Ok(());
        }

        let updates: Vec<&FetchResult> = report.updates().collect();
        let (current, problems): (Vec<&FetchResult>, Vec<&FetchResult>) = report
            .skips()
            .partition(|r| r.skip_reason == Some(SkipReason::AlreadyLatest));

        self.format_header(report, writer)?;
        let width = self.name_width(&report.results.iter().collect::<Vec<_>>());

        if updates.is_empty() {
            if problems.is_empty() {
                let message = "All packages are up to date";
                if self.color {
                    writeln!(writer, "{}", message.green())?;
                } else {
                    writeln!(writer, "{}", message)?;
                }
            }
        } else {
            for result in &updates {
                self.format_update_line(result, width, writer)?;
            }
        }

        if !problems.is_empty() {
            writeln!(writer)?;
            self.format_heading("Could not check:", writer)?;
            for result in &problems {
                self.format_skip_line(result, width, writer)?;
            }
        }

        if self.verbosity == Verbosity::Verbose && !current.is_empty() {
            writeln!(writer)?;
            self.format_heading("Up to date:", writer)?;
            for result in &current {
                self.format_skip_line(result, width, writer)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer)?;
            writeln!(
                writer,
                "Checked {} packages: {} to update, {} up to date, {} failed",
                report.total_requirements(),
                updates.len(),
                current.len(),
                problems.len()
            )?;
        }

        if report.has_changes() || report.written {
            writeln!(writer)?;
        }
        self.format_footer(report, writer)
    }
}
