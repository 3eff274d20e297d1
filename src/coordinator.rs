//! Concurrent registry lookups with a bounded number of requests in flight

use crate::domain::{FetchResult, Requirement};
use crate::progress::Progress;
use crate::registry::RegistryAdapter;
use crate::update::UpdateJudge;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Default number of concurrent registry requests
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Runs the registry adapter over every requirement and judges each result
pub struct FetchCoordinator {
    adapter: Arc<dyn RegistryAdapter>,
    semaphore: Arc<Semaphore>,
    judge: UpdateJudge,
    concurrency: usize,
}

impl FetchCoordinator {
    /// Create a coordinator with the default concurrency limit
    pub fn new(adapter: Arc<dyn RegistryAdapter>) -> Self {
        Self::with_concurrency(adapter, DEFAULT_CONCURRENCY)
    }

    /// Create a coordinator allowing `concurrency` lookups in flight (at least one)
    pub fn with_concurrency(adapter: Arc<dyn RegistryAdapter>, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            adapter,
            semaphore: Arc::new(Semaphore::new(concurrency)),
            judge: UpdateJudge::new(),
            concurrency,
        }
    }

    /// Maximum number of lookups in flight
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Fetch and judge every requirement
    ///
    /// Results are returned in the same order as `requirements`. A failed
    /// lookup only affects its own result.
    pub async fn fetch_all(&self, requirements: &[Requirement]) -> Vec<FetchResult> {
        self.fetch_all_with_progress(requirements, None).await
    }

    /// Same as `fetch_all`, ticking `progress` once per completed lookup
    pub async fn fetch_all_with_progress(
        &self,
        requirements: &[Requirement],
        progress: Option<&Progress>,
    ) -> Vec<FetchResult> {
        let lookups = requirements.iter().map(|requirement| async move {
            let result = self.fetch_one(requirement).await;
            if let Some(progress) = progress {
                progress.set_message(&requirement.name);
                progress.inc();
            }
            result
        });

        join_all(lookups).await
    }

    async fn fetch_one(&self, requirement: &Requirement) -> FetchResult {
        let latest = {
            let _permit = match self.semaphore.acquire().await {
                Ok(permit) => permit,
                Err(e) => return FetchResult::fetch_failed(requirement.clone(), e.to_string()),
            };
            self.adapter.latest_version(&requirement.name).await
        };

        match latest {
            Ok(version) => {
                debug!("{}: latest version {}", requirement.name, version);
                self.judge.judge(requirement, Some(&version))
            }
            Err(e) => {
                warn!("{}", e);
                FetchResult::fetch_failed(requirement.clone(), e.to_string())
            }
        }
    }
}
