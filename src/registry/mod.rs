//! Registry adapters for fetching the latest published version of a package
//!
//! This module provides:
//! - HTTP client shared foundation with timeout and retry logic
//! - PyPI JSON API adapter

mod client;
mod pypi;

pub use client::{HttpClient, DEFAULT_RETRIES, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use pypi::{PyPIAdapter, DEFAULT_INDEX_URL};

use crate::error::RegistryError;
use async_trait::async_trait;

/// Trait for registry adapters
///
/// Failures come back as values; callers decide how a failed lookup affects
/// the run.
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch the latest published version of a package
    async fn latest_version(&self, package: &str) -> Result<String, RegistryError>;
}
