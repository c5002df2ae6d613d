//! Command line argument parsing and validation.

use crate::ReleaseConfig;
use crate::index::{
    DEFAULT_PRODUCTION_NAME, DEFAULT_PRODUCTION_URL, DEFAULT_STAGING_NAME, DEFAULT_STAGING_URL,
    IndexKind, PackageIndex,
};
use crate::logging::LoggingConfig;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Guided release: bump version, update changelog, publish staging then production
#[derive(Parser, Debug)]
#[command(
    name = "index_release",
    about = "Guided release process for a package index",
    long_about = "Bump the version in pyproject.toml, add a CHANGELOG.md entry and publish
to the staging index, then the production index. Versions already on an
index are never uploaded again.

Usage:
  index_release
  index_release --version 0.3.0 -y
  index_release --dry-run
  index_release --test-only --skip-tests"
)]
pub struct Args {
    /// New version number (e.g., 0.2.19); defaults to a patch bump
    #[arg(long = "version", value_name = "VERSION")]
    pub new_version: Option<String>,

    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Non-interactive mode, assume yes to prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Skip the staging index publication phase
    #[arg(long, alias = "skip-testpypi")]
    pub skip_staging: bool,

    /// Only perform the staging index phase and exit
    #[arg(long)]
    pub test_only: bool,

    /// Pass --skip-tests to publish commands
    #[arg(long)]
    pub skip_tests: bool,

    /// Pass --skip-build to publish commands
    #[arg(long)]
    pub skip_build: bool,

    /// Number of times to retry upload on failure in publish commands
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub upload_retries: u32,

    /// Project root; defaults to the nearest ancestor holding pyproject.toml
    #[arg(long, value_name = "PATH")]
    pub project_root: Option<PathBuf>,

    /// Publish command, invoked with --repo and --version appended
    #[arg(
        long,
        value_name = "CMD",
        env = "INDEX_RELEASE_PUBLISH_COMMAND",
        default_value = crate::DEFAULT_PUBLISH_COMMAND
    )]
    pub publish_command: String,

    /// Staging index repository name
    #[arg(long, value_name = "NAME", env = "INDEX_RELEASE_STAGING_INDEX", default_value = DEFAULT_STAGING_NAME)]
    pub staging_index: String,

    /// Staging index metadata API base URL
    #[arg(long, value_name = "URL", env = "INDEX_RELEASE_STAGING_URL", default_value = DEFAULT_STAGING_URL)]
    pub staging_url: String,

    /// Production index repository name
    #[arg(long, value_name = "NAME", env = "INDEX_RELEASE_PRODUCTION_INDEX", default_value = DEFAULT_PRODUCTION_NAME)]
    pub production_index: String,

    /// Production index metadata API base URL
    #[arg(long, value_name = "URL", env = "INDEX_RELEASE_PRODUCTION_URL", default_value = DEFAULT_PRODUCTION_URL)]
    pub production_url: String,

    /// Timeout in seconds for package index queries
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub index_timeout: u64,

    /// Increase diagnostic logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Some(version) = &self.new_version
            && version.trim().is_empty()
        {
            return Err("--version must not be empty".to_string());
        }

        if self.publish_command.split_whitespace().next().is_none() {
            return Err("--publish-command must not be empty".to_string());
        }

        if self.index_timeout == 0 {
            return Err("--index-timeout must be at least 1 second".to_string());
        }

        Ok(())
    }

    /// Release configuration for this invocation
    pub fn release_config(&self) -> ReleaseConfig {
        ReleaseConfig {
            version: self.new_version.clone(),
            dry_run: self.dry_run,
            yes: self.yes,
            skip_staging: self.skip_staging,
            test_only: self.test_only,
            skip_tests: self.skip_tests,
            skip_build: self.skip_build,
            upload_retries: self.upload_retries,
            staging: PackageIndex {
                kind: IndexKind::Staging,
                name: self.staging_index.clone(),
                base_url: self.staging_url.clone(),
            },
            production: PackageIndex {
                kind: IndexKind::Production,
                name: self.production_index.clone(),
                base_url: self.production_url.clone(),
            },
            publish_command: self
                .publish_command
                .split_whitespace()
                .map(String::from)
                .collect(),
        }
    }

    /// Index query timeout
    pub fn index_timeout(&self) -> Duration {
        Duration::from_secs(self.index_timeout)
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    /// Diagnostic logging configuration
    logging: LoggingConfig,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(output: super::OutputManager, logging: LoggingConfig) -> Self {
        Self { output, logging }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Get a reference to the logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(
            super::OutputManager::new(args.verbose > 0, args.quiet),
            LoggingConfig::from_env(args.verbose, args.quiet),
        )
    }
}
