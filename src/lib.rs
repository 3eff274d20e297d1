//! reqbump - requirements.txt updater library
//!
//! This library provides the pipeline behind the `reqbump` binary:
//! - Parse pins from a pip-style requirements.txt
//! - Look up the latest release of each package on PyPI, a few at a time
//! - Compare versions under PEP 440 ordering
//! - Rewrite outdated pins in place, optionally keeping a `.bak` copy

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod update;
