//! Core domain models for reqbump
//!
//! This module contains the fundamental types used throughout the application:
//! - Version operators recognized in requirement lines
//! - Requirement entries parsed from the manifest
//! - Per-package fetch results and the derived update set
//! - The run report consumed by output formatters

mod fetch_result;
mod operator;
mod report;
mod requirement;

pub use fetch_result::{FetchResult, SkipReason, UpdateSet};
pub use operator::VersionOperator;
pub use report::{LineChange, RunReport};
pub use requirement::Requirement;
