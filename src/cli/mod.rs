//! Command line interface for index_release.
//!
//! Parses arguments, builds the immutable release configuration and hands
//! control to the release command.

mod args;
pub mod commands;
mod output;

pub use args::{Args, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

/// Main CLI entry point
///
/// Installs logging from the parsed arguments before anything else runs.
pub async fn run() -> i32 {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);
    config.logging().install();
    execute_command(&args, &config).await
}
