//! PyPI JSON API adapter
//!
//! Fetches the latest release of a package from PyPI.
//! API endpoint: {index}/pypi/{package}/json

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;
use serde::Deserialize;

/// Default PyPI base URL
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    info: PyPIInfo,
}

/// Package information block
#[derive(Debug, Deserialize)]
struct PyPIInfo {
    /// Latest version according to PyPI
    version: String,
}

impl PyPIAdapter {
    /// Create a new PyPI adapter against pypi.org
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_INDEX_URL)
    }

    /// Create a PyPI adapter against another index serving the same JSON API
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl RegistryAdapter for PyPIAdapter {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        let version = response.info.version.trim();
        if version.is_empty() {
            return Err(RegistryError::invalid_response(
                package,
                self.registry_name(),
                "empty version field",
            ));
        }

        Ok(version.to_string())
    }
}
