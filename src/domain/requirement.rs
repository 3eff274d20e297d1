//! Requirement entries parsed from a requirements file

use super::VersionOperator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One package line of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// 0-based line number in the manifest, used as the rewrite key
    pub line_index: usize,
    /// Package name (the whole stripped line for unpinned entries)
    pub name: String,
    /// Operator in front of the pinned version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<VersionOperator>,
    /// Pinned version token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<String>,
    /// Stripped line text as it appears in the manifest
    pub raw_line: String,
}

impl Requirement {
    /// Creates a requirement with an operator and version
    pub fn pinned(
        line_index: usize,
        name: impl Into<String>,
        operator: VersionOperator,
        version: impl Into<String>,
        raw_line: impl Into<String>,
    ) -> Self {
        Self {
            line_index,
            name: name.into(),
            operator: Some(operator),
            pinned_version: Some(version.into()),
            raw_line: raw_line.into(),
        }
    }

    /// Creates a requirement without a version; the stripped line is the name
    pub fn unpinned(line_index: usize, raw_line: impl Into<String>) -> Self {
        let raw_line = raw_line.into();
        Self {
            line_index,
            name: raw_line.clone(),
            operator: None,
            pinned_version: None,
            raw_line,
        }
    }

    /// Returns true if this requirement carries a version
    pub fn is_pinned(&self) -> bool {
        self.pinned_version.is_some()
    }

    /// Returns the current version string
    pub fn version(&self) -> Option<&str> {
        self.pinned_version.as_deref()
    }

    /// Builds the stripped line with `new_version` in place of the current one
    ///
    /// Pinned lines keep their operator and any trailing text; unpinned lines
    /// gain an `==` pin.
    pub fn updated_line(&self, new_version: &str) -> String {
        match (self.operator, self.pinned_version.as_deref()) {
            (Some(operator), Some(old_version)) => {
                let head = self.name.len() + operator.as_str().len();
                let tail = self
                    .raw_line
                    .get(head + old_version.len()..)
                    .unwrap_or_default();
                format!("{}{}{}", self.name, operator.format_pin(new_version), tail)
            }
            _ => format!(
                "{}{}",
                self.raw_line,
                VersionOperator::Exact.format_pin(new_version)
            ),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.operator, self.pinned_version.as_deref()) {
            (Some(operator), Some(version)) => write!(f, "{}{}{}", self.name, operator, version),
            _ => write!(f, "{}", self.name),
        }
    }
}
