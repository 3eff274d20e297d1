//! requirements.txt parser
//!
//! Handles lines of the form:
//! - Pinned: `requests==2.31.0`, `django>=4.2`, `attrs~=23.1`
//! - Unpinned: `flask`
//! - Blank lines and `#` comments, which produce no entry
//!
//! Extras, environment markers and inline comments are not interpreted. They
//! stay in the trailing text of a pinned line, or become part of the name of
//! a line without a recognized operator.

use crate::domain::{Requirement, VersionOperator};
use regex::Regex;
use std::sync::LazyLock;

/// Comment marker at the start of a stripped line
const COMMENT_MARKER: char = '#';

// name, operator, version, then anything
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_\-\.]+)(==|>=|<=|~=|>|<)([a-zA-Z0-9_\-\.]+).*$").unwrap()
});

/// Returns true for lines that never produce an entry
pub fn is_ignorable(stripped: &str) -> bool {
    stripped.is_empty() || stripped.starts_with(COMMENT_MARKER)
}

/// Parse a single stripped line into a requirement
pub fn parse_line(line_index: usize, stripped: &str) -> Option<Requirement> {
    if is_ignorable(stripped) {
        return None;
    }

    if let Some(caps) = REQUIREMENT_RE.captures(stripped) {
        let name = caps.get(1)?.as_str();
        let operator = VersionOperator::from_symbol(caps.get(2)?.as_str())?;
        let version = caps.get(3)?.as_str();
        return Some(Requirement::pinned(
            line_index, name, operator, version, stripped,
        ));
    }

    Some(Requirement::unpinned(line_index, stripped))
}

/// Parse every requirement in manifest content, in file order
pub fn parse_requirements(content: &str) -> Vec<Requirement> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_line(index, line.trim()))
        .collect()
}
