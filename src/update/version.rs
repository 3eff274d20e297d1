//! PEP 440 version parsing and ordering
//!
//! Versions are ordered with `pep440_rs`, which understands epochs,
//! pre/post/dev releases and arbitrary numeric segments (including
//! date-style versions such as `2024.1.15`).

use pep508_rs::pep440_rs::Version;
use std::cmp::Ordering;
use std::str::FromStr;

/// Parse a version string as a PEP 440 version
pub fn parse_version(raw: &str) -> Result<Version, String> {
    Version::from_str(raw.trim()).map_err(|e| format!("invalid version '{}': {}", raw, e))
}

/// Compare two version strings under PEP 440 ordering
///
/// Fails if either side is not a valid PEP 440 version; there is no
/// lexical fallback.
pub fn compare_versions(a: &str, b: &str) -> Result<Ordering, String> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;
    Ok(a.cmp(&b))
}

/// Returns true if `latest` is strictly newer than `current`
pub fn is_newer(current: &str, latest: &str) -> Result<bool, String> {
    Ok(compare_versions(latest, current)? == Ordering::Greater)
}
