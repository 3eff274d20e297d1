//! Update judgment logic for requirements
//!
//! This module provides:
//! - PEP 440 version ordering
//! - Update judgment engine that decides whether to bump or skip a pin

mod version;

pub use version::{compare_versions, is_newer, parse_version};

use crate::domain::{FetchResult, Requirement, SkipReason};

/// Update judgment engine that decides whether to bump a requirement
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateJudge;

impl UpdateJudge {
    /// Create a new UpdateJudge
    pub fn new() -> Self {
        Self
    }

    /// Judge whether to update a requirement given the registry's latest version
    ///
    /// `latest` is `None` when the lookup failed; the requirement is then
    /// left untouched.
    pub fn judge(&self, requirement: &Requirement, latest: Option<&str>) -> FetchResult {
        let Some(latest) = latest else {
            return FetchResult::fetch_failed(requirement.clone(), "no version available");
        };

        // Unpinned entries always get pinned to the latest version
        let Some(current) = requirement.version() else {
            return FetchResult::update(requirement.clone(), latest);
        };

        match is_newer(current, latest) {
            Ok(true) => FetchResult::update(requirement.clone(), latest),
            Ok(false) => FetchResult::skip(
                requirement.clone(),
                Some(latest.to_string()),
                SkipReason::AlreadyLatest,
            ),
            Err(message) => FetchResult::skip(
                requirement.clone(),
                Some(latest.to_string()),
                SkipReason::ParseError(message),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionOperator;

    fn pinned(name: &str, op: VersionOperator, version: &str) -> Requirement {
        let raw = format!("{}{}{}", name, op, version);
        Requirement::pinned(0, name, op, version, raw)
    }

    #[test]
    fn test_judge_newer_version() {
        let judge = UpdateJudge::new();
        let req = pinned("requests", VersionOperator::Exact, "2.25.0");

        let result = judge.judge(&req, Some("2.31.0"));

        assert!(result.should_update);
        assert_eq!(result.resolved_version.as_deref(), Some("2.31.0"));
        assert!(result.skip_reason.is_none());
    }

    #[test]
    fn test_judge_already_latest() {
        let judge = UpdateJudge::new();
        let req = pinned("requests", VersionOperator::Exact, "2.31.0");

        let result = judge.judge(&req, Some("2.31.0"));

        assert!(!result.should_update);
        assert_eq!(result.skip_reason, Some(SkipReason::AlreadyLatest));
        assert_eq!(result.resolved_version.as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_judge_pin_ahead_of_registry() {
        let judge = UpdateJudge::new();
        let req = pinned("django", VersionOperator::GreaterOrEqual, "5.0");

        let result = judge.judge(&req, Some("4.2.7"));

        assert!(!result.should_update);
        assert_eq!(result.skip_reason, Some(SkipReason::AlreadyLatest));
    }

    #[test]
    fn test_judge_numeric_ordering() {
        let judge = UpdateJudge::new();
        let req = pinned("flask", VersionOperator::Exact, "2.9.0");

        assert!(judge.judge(&req, Some("2.10.0")).should_update);
    }

    #[test]
    fn test_judge_unpinned_always_updates() {
        let judge = UpdateJudge::new();
        let req = Requirement::unpinned(3, "flask");

        let result = judge.judge(&req, Some("3.0.0"));

        assert!(result.should_update);
        assert_eq!(result.resolved_version.as_deref(), Some("3.0.0"));
    }

    #[test]
    fn test_judge_lookup_failed() {
        let judge = UpdateJudge::new();
        let req = pinned("requests", VersionOperator::Exact, "2.25.0");

        let result = judge.judge(&req, None);

        assert!(!result.should_update);
        assert!(result.resolved_version.is_none());
        assert!(matches!(result.skip_reason, Some(SkipReason::FetchFailed(_))));
    }

    #[test]
    fn test_judge_unpinned_lookup_failed() {
        let judge = UpdateJudge::new();
        let req = Requirement::unpinned(0, "flask");

        assert!(!judge.judge(&req, None).should_update);
    }

    #[test]
    fn test_judge_invalid_current_version() {
        let judge = UpdateJudge::new();
        let req = pinned("weird", VersionOperator::Exact, "not.a-version");

        let result = judge.judge(&req, Some("1.0.0"));

        assert!(!result.should_update);
        assert!(matches!(result.skip_reason, Some(SkipReason::ParseError(_))));
    }

    #[test]
    fn test_judge_invalid_latest_version() {
        let judge = UpdateJudge::new();
        let req = pinned("weird", VersionOperator::Exact, "1.0.0");

        let result = judge.judge(&req, Some("garbage!"));

        assert!(!result.should_update);
        assert!(matches!(result.skip_reason, Some(SkipReason::ParseError(_))));
    }

    #[test]
    fn test_judge_prerelease_pin_gets_final() {
        let judge = UpdateJudge::new();
        let req = pinned("pydantic", VersionOperator::Compatible, "2.0b3");

        assert!(judge.judge(&req, Some("2.0")).should_update);
    }
}
