//! Release command execution.
//!
//! Locates the project, wires the HTTP index client and the system command
//! runner into the orchestrator and runs it.

use crate::cli::{Args, RuntimeConfig};
use crate::error::{CliError, Result};
use crate::index::HttpIndexClient;
use crate::metadata::{ProjectMetadata, find_project_root};
use crate::publish::SystemCommandRunner;
use crate::release::{ReleaseOrchestrator, ReleaseOutcome};

/// Execute release command
pub async fn execute_release(args: &Args, config: &RuntimeConfig) -> Result<ReleaseOutcome> {
    let output = config.output();

    let root = match &args.project_root {
        Some(root) => root.clone(),
        None => find_project_root(&std::env::current_dir()?),
    };
    let _ = output.info(&format!("Preparing release in: {}", root.display()));

    let project = ProjectMetadata::load(&root)?;
    let _ = output.verbose(&format!("Package: {}", project.package_name));

    let release_config = args.release_config();
    let client =
        HttpIndexClient::new(args.index_timeout()).map_err(|e| CliError::ExecutionFailed {
            command: "build HTTP client".to_string(),
            reason: e.to_string(),
        })?;
    let runner = SystemCommandRunner::new(output.clone());

    ReleaseOrchestrator::new(&release_config, &project, &client, &runner, output)
        .run()
        .await
}
