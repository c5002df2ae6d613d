//! # Index Release
//!
//! Guided release workflow for a package published to a staging and a
//! production package index.
//!
//! A release bumps the version in `pyproject.toml`, adds a dated
//! `CHANGELOG.md` entry and publishes in two phases, staging first. Each
//! phase checks the index before uploading, so a version that is already
//! there is never uploaded again and an interrupted release can simply be
//! re-run.
//!
//! ## Usage
//!
//! ```bash
//! index_release                     # Bump patch, publish to staging then production
//! index_release --version 0.3.0     # Release an explicit version
//! index_release --dry-run           # Show current and next version only
//! index_release --test-only -y      # Stop after the staging index
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod changelog;
pub mod cli;
pub mod error;
pub mod index;
pub mod logging;
pub mod metadata;
pub mod publish;
pub mod release;
pub mod version;

pub use changelog::ChangelogUpdate;
pub use cli::Args;
pub use error::{ReleaseError, Result};
pub use index::{HttpIndexClient, IndexClient, PackageIndex};
pub use metadata::ProjectMetadata;
pub use publish::{CommandRunner, PublishPhaseResult, Publisher};
pub use release::{ReleaseOrchestrator, ReleaseOutcome};
pub use version::Version;

/// Default publish command line
pub const DEFAULT_PUBLISH_COMMAND: &str = "hatch run publish-mcp";

/// Configuration for one release invocation
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Explicit version, used verbatim instead of a patch bump
    pub version: Option<String>,
    /// Report versions and stop before changing anything
    pub dry_run: bool,
    /// Non-interactive mode, forwarded to the publish tool
    pub yes: bool,
    /// Skip the staging index phase
    pub skip_staging: bool,
    /// Stop after the staging index phase
    pub test_only: bool,
    /// Forward --skip-tests to the publish tool
    pub skip_tests: bool,
    /// Forward --skip-build to the publish tool
    pub skip_build: bool,
    /// Upload retry count forwarded to the publish tool
    pub upload_retries: u32,
    /// Staging index
    pub staging: PackageIndex,
    /// Production index
    pub production: PackageIndex,
    /// Publish program followed by its leading arguments
    pub publish_command: Vec<String>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            version: None,
            dry_run: false,
            yes: false,
            skip_staging: false,
            test_only: false,
            skip_tests: false,
            skip_build: false,
            upload_retries: 0,
            staging: PackageIndex::staging(),
            production: PackageIndex::production(),
            publish_command: DEFAULT_PUBLISH_COMMAND
                .split_whitespace()
                .map(String::from)
                .collect(),
        }
    }
}
