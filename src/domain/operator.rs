//! Version operators recognized in requirements files
//!
//! Handles the pip comparison operators:
//! - Exact: `==1.2.3`
//! - Compatible release: `~=1.2.3`
//! - Comparison: `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3`

use serde::{Deserialize, Serialize};
use std::fmt;

/// The operator between a package name and its pinned version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionOperator {
    /// `==`
    Exact,
    /// `>=`
    GreaterOrEqual,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `~=`
    Compatible,
}

impl VersionOperator {
    /// All operators, two-character ones first so that `>=` wins over `>`
    pub const ALL: [VersionOperator; 6] = [
        VersionOperator::Exact,
        VersionOperator::GreaterOrEqual,
        VersionOperator::LessOrEqual,
        VersionOperator::Compatible,
        VersionOperator::Greater,
        VersionOperator::Less,
    ];

    /// The operator exactly as written in the manifest
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOperator::Exact => "==",
            VersionOperator::GreaterOrEqual => ">=",
            VersionOperator::LessOrEqual => "<=",
            VersionOperator::Greater => ">",
            VersionOperator::Less => "<",
            VersionOperator::Compatible => "~=",
        }
    }

    /// Look up an operator by its textual form
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == symbol)
    }

    /// Formats a new version behind this operator
    pub fn format_pin(&self, version: &str) -> String {
        format!("{}{}", self.as_str(), version)
    }
}

impl fmt::Display for VersionOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        assert_eq!(VersionOperator::Exact.as_str(), "==");
        assert_eq!(VersionOperator::GreaterOrEqual.as_str(), ">=");
        assert_eq!(VersionOperator::LessOrEqual.as_str(), "<=");
        assert_eq!(VersionOperator::Greater.as_str(), ">");
        assert_eq!(VersionOperator::Less.as_str(), "<");
        assert_eq!(VersionOperator::Compatible.as_str(), "~=");
    }

    #[test]
    fn test_from_symbol_round_trips_every_operator() {
        for op in VersionOperator::ALL {
            assert_eq!(VersionOperator::from_symbol(op.as_str()), Some(op));
        }
    }

    #[test]
    fn test_from_symbol_unknown() {
        assert_eq!(VersionOperator::from_symbol("!="), None);
        assert_eq!(VersionOperator::from_symbol("^"), None);
        assert_eq!(VersionOperator::from_symbol(""), None);
    }

    #[test]
    fn test_format_pin() {
        assert_eq!(VersionOperator::Exact.format_pin("2.0.0"), "==2.0.0");
        assert_eq!(VersionOperator::Compatible.format_pin("1.4"), "~=1.4");
        assert_eq!(VersionOperator::GreaterOrEqual.format_pin("3.1"), ">=3.1");
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", VersionOperator::Less), "<");
    }

    #[test]
    fn test_serde_operator() {
        let json = serde_json::to_string(&VersionOperator::GreaterOrEqual).unwrap();
        assert_eq!(json, "\"greater_or_equal\"");
        let parsed: VersionOperator = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, VersionOperator::GreaterOrEqual);
    }
}
