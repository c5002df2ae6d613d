//! Release orchestration.
//!
//! Runs the whole workflow in order: resolve the version, rewrite the
//! metadata file, add the changelog entry, publish to staging, publish to
//! production. Any failure stops the run; nothing already done is undone.

use crate::ReleaseConfig;
use crate::changelog::{self, ChangelogUpdate};
use crate::cli::OutputManager;
use crate::error::{PublishError, Result};
use crate::index::{IndexClient, PackageIndex};
use crate::metadata::ProjectMetadata;
use crate::publish::{CommandRunner, PublishPhaseResult, Publisher};
use crate::version;
use chrono::NaiveDate;

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Dry run: versions were reported, nothing changed
    DryRun {
        /// Version found in the metadata file
        current: String,
        /// Version that would be released
        new: String,
    },
    /// Stopped after the staging index (`--test-only`)
    StagingOnly {
        /// Released version
        version: String,
    },
    /// Both phases finished
    Completed {
        /// Released version
        version: String,
    },
}

/// Drives one release from version resolution to production publish
pub struct ReleaseOrchestrator<'a, C, R> {
    config: &'a ReleaseConfig,
    project: &'a ProjectMetadata,
    client: &'a C,
    runner: &'a R,
    output: &'a OutputManager,
}

impl<'a, C: IndexClient, R: CommandRunner> ReleaseOrchestrator<'a, C, R> {
    /// Create an orchestrator for `project`
    pub fn new(
        config: &'a ReleaseConfig,
        project: &'a ProjectMetadata,
        client: &'a C,
        runner: &'a R,
        output: &'a OutputManager,
    ) -> Self {
        Self {
            config,
            project,
            client,
            runner,
            output,
        }
    }

    /// Run the release, dating the changelog entry today
    pub async fn run(&self) -> Result<ReleaseOutcome> {
        self.run_on(chrono::Local::now().date_naive()).await
    }

    /// Run the release, dating the changelog entry `date`
    pub async fn run_on(&self, date: NaiveDate) -> Result<ReleaseOutcome> {
        let current = &self.project.current_version;
        let _ = self.output.println(&format!("Current version: {}", current));

        let new_version = version::resolve_version(current, self.config.version.as_deref())?;
        let _ = self.output.println(&format!("New version: {}", new_version));

        if self.config.dry_run {
            let _ = self.output.info("Dry run mode. No changes will be made.");
            return Ok(ReleaseOutcome::DryRun {
                current: current.clone(),
                new: new_version,
            });
        }

        let metadata_path = self.project.metadata_path();
        let _ = self.output.progress(&format!(
            "Updating version in {} to {}...",
            metadata_path.display(),
            new_version
        ));
        version::apply_version(&metadata_path, &new_version)?;

        let changelog_path = self.project.changelog_path();
        let _ = self.output.progress(&format!(
            "Updating {} with new version {}...",
            changelog_path.display(),
            new_version
        ));
        match changelog::apply_changelog(&changelog_path, &new_version, date)? {
            ChangelogUpdate::Inserted => {
                let _ = self.output.success("Changelog updated");
            }
            ChangelogUpdate::Skipped => {
                let _ = self.output.warn(&format!(
                    "Changelog already contains version {}, skipping update",
                    new_version
                ));
            }
        }

        let publisher = Publisher::new(self.client, self.runner, self.config, &self.project.root);

        if self.config.skip_staging {
            let _ = self.output.info("Skipping staging index phase");
            if self.config.test_only {
                log::warn!("--test-only has no effect with --skip-staging; publishing to production");
            }
        } else {
            self.publish_phase(&publisher, &self.config.staging, &new_version)
                .await?;

            if self.config.test_only {
                let _ = self
                    .output
                    .info("Exiting after staging index phase (--test-only specified)");
                return Ok(ReleaseOutcome::StagingOnly {
                    version: new_version,
                });
            }
        }

        self.publish_phase(&publisher, &self.config.production, &new_version)
            .await?;

        Ok(ReleaseOutcome::Completed {
            version: new_version,
        })
    }

    async fn publish_phase(
        &self,
        publisher: &Publisher<'_, C, R>,
        index: &PackageIndex,
        version: &str,
    ) -> Result<()> {
        let _ = self.output.section(&format!("Publishing {} to {}", version, index));

        match publisher
            .publish(index, &self.project.package_name, version)
            .await?
        {
            PublishPhaseResult::AlreadyPublished => {
                let _ = self.output.warn(&format!(
                    "Version {} already exists on {}. Skipping upload.",
                    version, index.name
                ));
                Ok(())
            }
            PublishPhaseResult::Success => {
                let _ = self.output.success(&format!("Published to {}", index.name));
                Ok(())
            }
            PublishPhaseResult::Failure { exit_code } => Err(PublishError::PhaseFailed {
                index: index.name.clone(),
                exit_code,
            }
            .into()),
        }
    }
}
