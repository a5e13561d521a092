//! Bisect run configuration.
//!
//! Every value can come from a flag or its environment variable (clap merges
//! the two). `BisectConfig` is the normalised form the orchestrator consumes:
//! empty values are treated as unset and defaults are applied here, so nothing
//! downstream reads the process environment.

use std::path::PathBuf;

use crate::cli::Cli;

/// Environment variable overriding the bad endpoint
pub const BAD_HASH_ENV: &str = "BAD_HASH";

/// Environment variable overriding the good endpoint
pub const GOOD_HASH_ENV: &str = "GOOD_HASH";

/// Environment variable overriding the per-commit test command
pub const TEST_CMD_ENV: &str = "BISECT_TEST_CMD";

/// Test command used when none is configured
pub const DEFAULT_TEST_CMD: &str = "python manage.py test -q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BisectConfig {
    /// Directory the git commands run in
    pub repo_root: PathBuf,
    /// Override for the bad endpoint (HEAD otherwise)
    pub bad: Option<String>,
    /// Override for the good endpoint (first root commit otherwise)
    pub good: Option<String>,
    /// Command handed to `git bisect run`
    pub test_cmd: String,
    /// Whether to refresh history before resolving endpoints
    pub fetch: bool,
}

impl BisectConfig {
    pub fn new(
        repo_root: PathBuf,
        bad: Option<String>,
        good: Option<String>,
        test_cmd: Option<String>,
    ) -> Self {
        Self {
            repo_root,
            bad: non_empty(bad),
            good: non_empty(good),
            test_cmd: non_empty(test_cmd).unwrap_or_else(|| DEFAULT_TEST_CMD.to_string()),
            fetch: true,
        }
    }

    /// Build the configuration from parsed command-line arguments.
    pub fn from_cli(cli: &Cli, repo_root: PathBuf) -> Self {
        Self {
            fetch: !cli.no_fetch,
            ..Self::new(
                repo_root,
                cli.bad.clone(),
                cli.good.clone(),
                cli.test_cmd.clone(),
            )
        }
    }

    /// Disable the history refresh step.
    #[cfg(test)]
    pub fn without_fetch(mut self) -> Self {
        self.fetch = false;
        self
    }
}

/// Treat missing, empty and whitespace-only values the same way.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = BisectConfig::new(PathBuf::from("."), None, None, None);
        assert_eq!(config.bad, None);
        assert_eq!(config.good, None);
        assert_eq!(config.test_cmd, DEFAULT_TEST_CMD);
        assert!(config.fetch);
    }

    #[test]
    fn test_empty_overrides_are_unset() {
        let config = BisectConfig::new(
            PathBuf::from("."),
            Some(String::new()),
            Some("   ".to_string()),
            Some("".to_string()),
        );
        assert_eq!(config.bad, None);
        assert_eq!(config.good, None);
        assert_eq!(config.test_cmd, DEFAULT_TEST_CMD);
    }

    #[test]
    fn test_overrides_are_trimmed() {
        let config = BisectConfig::new(
            PathBuf::from("."),
            Some(" def456\n".to_string()),
            Some("abc123".to_string()),
            Some("exit 0".to_string()),
        );
        assert_eq!(config.bad.as_deref(), Some("def456"));
        assert_eq!(config.good.as_deref(), Some("abc123"));
        assert_eq!(config.test_cmd, "exit 0");
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var(BAD_HASH_ENV, "def456");
        std::env::set_var(GOOD_HASH_ENV, "abc123");
        std::env::set_var(TEST_CMD_ENV, "exit 0");
        let cli = Cli::try_parse_from(["autobisect"]).unwrap();

        assert_eq!(cli.bad.as_deref(), Some("def456"));
        assert_eq!(cli.good.as_deref(), Some("abc123"));
        assert_eq!(cli.test_cmd.as_deref(), Some("exit 0"));
        let config = BisectConfig::from_cli(&cli, PathBuf::from("/repo"));
        assert_eq!(config.test_cmd, "exit 0");

        std::env::set_var(TEST_CMD_ENV, "");
        let cli = Cli::try_parse_from(["autobisect"]).unwrap();
        let config = BisectConfig::from_cli(&cli, PathBuf::from("/repo"));

        std::env::remove_var(BAD_HASH_ENV);
        std::env::remove_var(GOOD_HASH_ENV);
        std::env::remove_var(TEST_CMD_ENV);

        assert_eq!(config.bad.as_deref(), Some("def456"));
        assert_eq!(config.good.as_deref(), Some("abc123"));
        assert_eq!(config.test_cmd, DEFAULT_TEST_CMD);
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "autobisect",
            "--bad",
            "def456",
            "--good",
            "abc123",
            "--test-cmd",
            "make check",
            "--no-fetch",
        ])
        .unwrap();
        let config = BisectConfig::from_cli(&cli, PathBuf::from("/repo"));

        assert_eq!(config.repo_root, PathBuf::from("/repo"));
        assert_eq!(config.bad.as_deref(), Some("def456"));
        assert_eq!(config.good.as_deref(), Some("abc123"));
        assert_eq!(config.test_cmd, "make check");
        assert!(!config.fetch);
    }
}
