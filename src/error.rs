//! Error types for index_release operations.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for index_release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all index_release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Version management errors
    #[error("Version error: {0}")]
    Version(#[from] VersionError),

    /// Changelog errors
    #[error("Changelog error: {0}")]
    Changelog(#[from] ChangelogError),

    /// Publishing errors
    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Version management errors
#[derive(Error, Debug)]
pub enum VersionError {
    /// Version does not have exactly three integer components
    #[error("Invalid version format '{version}'. Expected x.y.z")]
    InvalidVersionFormat {
        /// Offending version string
        version: String,
    },

    /// Metadata file carries no version declaration
    #[error("Could not find version in {path}")]
    MissingVersion {
        /// Path to the metadata file
        path: PathBuf,
    },

    /// Failed to rewrite the metadata file
    #[error("Failed to update version in {path}: {reason}")]
    UpdateFailed {
        /// Path to the metadata file
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Changelog errors
#[derive(Error, Debug)]
pub enum ChangelogError {
    /// Failed to read, create or rewrite the changelog
    #[error("Failed to update {path}: {reason}")]
    UpdateFailed {
        /// Path to the changelog
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },
}

/// Publishing errors
#[derive(Error, Debug)]
pub enum PublishError {
    /// Publish tool is not on PATH
    #[error("Publish tool '{program}' not found on PATH")]
    ToolNotFound {
        /// Program name
        program: String,
    },

    /// Publish command exited unsuccessfully
    #[error("Failed to publish to {index}{}", .exit_code.map(|c| format!(" (exit code {c})")).unwrap_or_default())]
    PhaseFailed {
        /// Index name
        index: String,
        /// Exit code, if the process exited normally
        exit_code: Option<i32>,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ReleaseError::Version(VersionError::InvalidVersionFormat { .. }) => vec![
                "Fix the version declaration so it reads version = \"x.y.z\"".to_string(),
                "Pass an explicit version with --version".to_string(),
            ],
            ReleaseError::Version(VersionError::MissingVersion { path }) => vec![format!(
                "Add a version = \"x.y.z\" line to {}",
                path.display()
            )],
            ReleaseError::Publish(PublishError::ToolNotFound { program }) => vec![
                format!("Install '{}' or put it on PATH", program),
                "Point --publish-command at a different publish tool".to_string(),
            ],
            ReleaseError::Publish(PublishError::PhaseFailed { .. }) => vec![
                "Check the publish tool output above".to_string(),
                "Re-run with --upload-retries to retry flaky uploads".to_string(),
                "Versions already on an index are skipped on re-run".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
