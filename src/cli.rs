//! CLI argument parsing module for reqbump

use crate::config::Overrides;
use clap::Parser;
use std::path::PathBuf;

/// Parse a concurrency limit; zero would stall every lookup
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", s))?;
    if n == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse a timeout in whole seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if n == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(n)
}

/// Update pinned packages in a requirements.txt to their latest PyPI releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reqbump",
    version,
    about = "Update requirements.txt pins to the latest PyPI releases"
)]
pub struct CliArgs {
    /// Requirements file to update [default: requirements.txt]
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Do not write <file>.bak before rewriting
    #[arg(long)]
    pub no_backup: bool,

    // General options
    /// Dry run mode - show what would be updated without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Enable quiet mode - only errors are printed
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    // Registry options
    /// Base URL of the package index (PyPI JSON API)
    #[arg(long, value_name = "URL")]
    pub index_url: Option<String>,

    /// Maximum number of concurrent registry requests [default: 5]
    #[arg(long, value_name = "N", value_parser = parse_concurrency)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds [default: 10]
    #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Config file (default: reqbump.toml next to the requirements file)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Settings given on the command line, layered over the config file
    pub fn overrides(&self) -> Overrides {
        Overrides {
            manifest: self.file.clone(),
            config: self.config.clone(),
            no_backup: self.no_backup,
            dry_run: self.dry_run,
            index_url: self.index_url.clone(),
            concurrency: self.concurrency,
            timeout_secs: self.timeout,
        }
    }

    /// Whether the progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["reqbump"]);
        assert!(args.file.is_none());
        assert!(!args.no_backup);
        assert!(!args.dry_run);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(args.index_url.is_none());
        assert!(args.concurrency.is_none());
        assert!(args.timeout.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_file_short_flag() {
        let args = CliArgs::parse_from(["reqbump", "-f", "deps/requirements-dev.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("deps/requirements-dev.txt")));
    }

    #[test]
    fn test_file_long_flag() {
        let args = CliArgs::parse_from(["reqbump", "--file", "reqs.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("reqs.txt")));
    }

    #[test]
    fn test_no_backup_flag() {
        let args = CliArgs::parse_from(["reqbump", "--no-backup"]);
        assert!(args.no_backup);
        assert!(args.overrides().no_backup);
    }

    #[test]
    fn test_dry_run_short_flag() {
        let args = CliArgs::parse_from(["reqbump", "-n"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_dry_run_long_flag() {
        let args = CliArgs::parse_from(["reqbump", "--dry-run"]);
        assert!(args.dry_run);
    }

    #[test]
    fn test_verbose_flags() {
        assert!(CliArgs::parse_from(["reqbump", "-v"]).verbose);
        assert!(CliArgs::parse_from(["reqbump", "--verbose"]).verbose);
    }

    #[test]
    fn test_quiet_flags() {
        assert!(CliArgs::parse_from(["reqbump", "-q"]).quiet);
        assert!(CliArgs::parse_from(["reqbump", "--quiet"]).quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["reqbump", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_json_flag() {
        let args = CliArgs::parse_from(["reqbump", "--json"]);
        assert!(args.json);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_show_progress() {
        assert!(CliArgs::parse_from(["reqbump"]).show_progress());
        assert!(!CliArgs::parse_from(["reqbump", "-q"]).show_progress());
    }

    #[test]
    fn test_registry_options() {
        let args = CliArgs::parse_from([
            "reqbump",
            "--index-url",
            "http://localhost:3141",
            "--concurrency",
            "8",
            "--timeout",
            "30",
        ]);
        assert_eq!(args.index_url.as_deref(), Some("http://localhost:3141"));
        assert_eq!(args.concurrency, Some(8));
        assert_eq!(args.timeout, Some(30));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = CliArgs::try_parse_from(["reqbump", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        assert!(CliArgs::try_parse_from(["reqbump", "--timeout", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["reqbump", "--timeout", "soon"]).is_err());
    }

    #[test]
    fn test_config_flag() {
        let args = CliArgs::parse_from(["reqbump", "--config", "ci/reqbump.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("ci/reqbump.toml")));
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::parse_from([
            "reqbump",
            "-f",
            "reqs.txt",
            "-n",
            "--concurrency",
            "2",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.manifest, Some(PathBuf::from("reqs.txt")));
        assert!(overrides.dry_run);
        assert!(!overrides.no_backup);
        assert_eq!(overrides.concurrency, Some(2));
        assert!(overrides.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_concurrency() {
        assert_eq!(parse_concurrency("5"), Ok(5));
        assert!(parse_concurrency("0").is_err());
        assert!(parse_concurrency("-1").is_err());
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("10"), Ok(10));
        assert!(parse_timeout("").is_err());
    }
}
