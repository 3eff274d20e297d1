//! Update orchestrator for coordinating the entire update workflow
//!
//! This module provides:
//! - Workflow coordination: read → parse → fetch → judge → write
//! - Bounded parallel registry queries
//! - Dry-run and backup handling
//! - Partial continuation when individual lookups fail

use crate::config::Settings;
use crate::coordinator::FetchCoordinator;
use crate::domain::{RunReport, UpdateSet};
use crate::error::AppError;
use crate::manifest::{parse_requirements, read_manifest, ManifestWriter};
use crate::progress::Progress;
use crate::registry::{HttpClient, PyPIAdapter, RegistryAdapter, DEFAULT_USER_AGENT};
use std::sync::Arc;
use tracing::{debug, info};

/// Orchestrator for coordinating the update workflow
pub struct Orchestrator {
    /// Resolved run settings
    settings: Settings,
    /// Registry every requirement is looked up in
    adapter: Arc<dyn RegistryAdapter>,
}

impl Orchestrator {
    /// Create an orchestrator querying the index configured in `settings`
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        let client = HttpClient::with_config(settings.timeout, DEFAULT_USER_AGENT)?
            .with_max_retries(settings.retries);
        let adapter = PyPIAdapter::with_base_url(client, settings.index_url.clone());

        Ok(Self::with_adapter(settings, Arc::new(adapter)))
    }

    /// Create an orchestrator with a custom registry adapter (for testing)
    pub fn with_adapter(settings: Settings, adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self { settings, adapter }
    }

    /// Settings this orchestrator runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the update workflow
    pub async fn run(&self) -> Result<RunReport, AppError> {
        self.run_with_progress(false).await
    }

    /// Run the update workflow with optional progress display
    ///
    /// Only manifest errors abort the run; they happen either before any
    /// network activity (read) or after all lookups are done (backup, write).
    pub async fn run_with_progress(&self, show_progress: bool) -> Result<RunReport, AppError> {
        let path = &self.settings.manifest;
        let mut report = RunReport::new(path, self.settings.dry_run);

        // Step 1: Read and parse the manifest
        let content = read_manifest(path)?;
        let requirements = parse_requirements(&content);
        debug!(
            "parsed {} requirement(s) from {}",
            requirements.len(),
            path.display()
        );

        if requirements.is_empty() {
            info!("no requirements in {}", path.display());
            return Ok(report);
        }

        // Step 2: Fetch latest versions and judge each requirement
        let coordinator =
            FetchCoordinator::with_concurrency(self.adapter.clone(), self.settings.concurrency);
        let mut progress = Progress::new(show_progress);
        progress.start(requirements.len() as u64, "Checking packages");
        let results = coordinator
            .fetch_all_with_progress(&requirements, Some(&progress))
            .await;
        progress.finish_and_clear();

        // Step 3: Apply updates (unless dry-run)
        let updates = UpdateSet::from_results(&results);
        debug!("{} package(s) to update", updates.len());

        let writer = ManifestWriter::new(self.settings.backup, self.settings.dry_run);
        let outcome = writer.apply(path, &content, &requirements, &updates)?;

        report.results = results;
        report.changes = outcome.changes;
        report.backup = outcome.backup;
        report.written = outcome.file_modified;

        Ok(report)
    }
}
