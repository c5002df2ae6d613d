//! Package publishing for one index at a time.
//!
//! Every phase checks the index first and only shells out to the publish
//! tool when the version is not there yet.

mod command;

pub use command::{CommandRunner, SystemCommandRunner, display_command};

use crate::ReleaseConfig;
use crate::error::{CliError, Result};
use crate::index::{IndexClient, PackageIndex};
use std::path::Path;

/// Outcome of one index publish phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPhaseResult {
    /// The index already had this version; nothing was uploaded
    AlreadyPublished,
    /// The publish command exited with status zero
    Success,
    /// The publish command exited unsuccessfully
    Failure {
        /// Exit code, if the process exited normally
        exit_code: Option<i32>,
    },
}

impl PublishPhaseResult {
    /// Whether the release may move on to the next phase
    pub fn is_ok(&self) -> bool {
        !matches!(self, PublishPhaseResult::Failure { .. })
    }
}

/// Arguments passed after the publish program for one phase
pub fn publish_args(config: &ReleaseConfig, index: &PackageIndex, version: &str) -> Vec<String> {
    let mut args: Vec<String> = config.publish_command.iter().skip(1).cloned().collect();
    args.extend([
        "--repo".to_string(),
        index.name.clone(),
        "--version".to_string(),
        version.to_string(),
    ]);

    if config.skip_tests {
        args.push("--skip-tests".to_string());
    }
    if config.skip_build {
        args.push("--skip-build".to_string());
    }
    if config.yes {
        args.push("--yes".to_string());
    }
    if config.upload_retries > 0 {
        args.push("--upload-retries".to_string());
        args.push(config.upload_retries.to_string());
    }
    args
}

/// Publishes one version to one index per call
#[derive(Debug)]
pub struct Publisher<'a, C, R> {
    client: &'a C,
    runner: &'a R,
    config: &'a ReleaseConfig,
    project_root: &'a Path,
}

impl<'a, C: IndexClient, R: CommandRunner> Publisher<'a, C, R> {
    /// Create a publisher running the publish tool from `project_root`
    pub fn new(
        client: &'a C,
        runner: &'a R,
        config: &'a ReleaseConfig,
        project_root: &'a Path,
    ) -> Self {
        Self {
            client,
            runner,
            config,
            project_root,
        }
    }

    /// Publish `version` of `package` to `index` unless it is already there
    pub async fn publish(
        &self,
        index: &PackageIndex,
        package: &str,
        version: &str,
    ) -> Result<PublishPhaseResult> {
        if self.client.check_remote_version(index, package, version).await {
            log::info!("{} {} already on {}, skipping upload", package, version, index.name);
            return Ok(PublishPhaseResult::AlreadyPublished);
        }

        let program =
            self.config
                .publish_command
                .first()
                .ok_or_else(|| CliError::InvalidArguments {
                    reason: "publish command is empty".to_string(),
                })?;
        let args = publish_args(self.config, index, version);

        let exit_code = self.runner.run(program, &args, self.project_root)?;
        log::debug!("{} exited with {:?}", program, exit_code);

        Ok(match exit_code {
            Some(0) => PublishPhaseResult::Success,
            other => PublishPhaseResult::Failure { exit_code: other },
        })
    }
}
