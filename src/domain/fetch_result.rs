//! Per-package lookup results and the update set derived from them

use super::Requirement;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Reason why a requirement was left untouched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Already at (or ahead of) the latest version
    AlreadyLatest,
    /// Failed to fetch version info from the registry
    FetchFailed(String),
    /// A version string could not be ordered
    ParseError(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyLatest => write!(f, "already at latest"),
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::ParseError(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

/// Result of checking one requirement against the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    /// The requirement that was checked
    pub requirement: Requirement,
    /// Latest version reported by the registry, if the lookup succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_version: Option<String>,
    /// Whether the requirement should be bumped to `resolved_version`
    pub should_update: bool,
    /// Why the requirement is left alone, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
}

impl FetchResult {
    /// Creates an update result
    pub fn update(requirement: Requirement, new_version: impl Into<String>) -> Self {
        Self {
            requirement,
            resolved_version: Some(new_version.into()),
            should_update: true,
            skip_reason: None,
        }
    }

    /// Creates a skip result
    pub fn skip(
        requirement: Requirement,
        resolved_version: Option<String>,
        reason: SkipReason,
    ) -> Self {
        Self {
            requirement,
            resolved_version,
            should_update: false,
            skip_reason: Some(reason),
        }
    }

    /// Creates a skip result for a failed lookup
    pub fn fetch_failed(requirement: Requirement, message: impl Into<String>) -> Self {
        Self::skip(requirement, None, SkipReason::FetchFailed(message.into()))
    }

    /// Returns true if this is a skip result
    pub fn is_skip(&self) -> bool {
        !self.should_update
    }

    /// Returns the package name
    pub fn package_name(&self) -> &str {
        &self.requirement.name
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self.requirement.version().unwrap_or("unpinned");
        match (&self.skip_reason, &self.resolved_version) {
            (None, Some(new_version)) => {
                write!(f, "{}: {} → {}", self.requirement.name, current, new_version)
            }
            (Some(reason), _) => write!(f, "{}: skipped ({})", self.requirement.name, reason),
            (None, None) => write!(f, "{}: skipped", self.requirement.name),
        }
    }
}

/// Packages approved for a bump, keyed by package name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSet {
    updates: BTreeMap<String, String>,
    /// Line indexes whose own result asked for an update
    lines: BTreeSet<usize>,
}

impl UpdateSet {
    /// Creates an empty update set
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every result with `should_update`; the first result per name wins
    pub fn from_results(results: &[FetchResult]) -> Self {
        let mut set = Self::new();
        for result in results.iter().filter(|r| r.should_update) {
            if let Some(version) = &result.resolved_version {
                set.insert(result.requirement.line_index, result.package_name(), version);
            }
        }
        set
    }

    /// Marks `line_index` for rewriting; the first version per package wins
    pub fn insert(
        &mut self,
        line_index: usize,
        package: impl Into<String>,
        version: impl Into<String>,
    ) {
        self.lines.insert(line_index);
        self.updates
            .entry(package.into())
            .or_insert_with(|| version.into());
    }

    /// Whether the line at `line_index` may be rewritten
    pub fn approves_line(&self, line_index: usize) -> bool {
        self.lines.contains(&line_index)
    }

    /// New version for a package
    pub fn get(&self, package: &str) -> Option<&str> {
        self.updates.get(package).map(String::as_str)
    }

    /// Number of packages to update
    pub fn len(&self) -> usize {
        self.updates.len()
    }

    /// Returns true if there is nothing to update
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    /// Iterates over `(package, new_version)` in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.updates.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
