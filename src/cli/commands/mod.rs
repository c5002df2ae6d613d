//! Command execution.
//!
//! Validates arguments, runs the release and maps the outcome to a process
//! exit code: 0 for success or an intentional early stop, 1 otherwise.

mod release;

use crate::cli::{Args, RuntimeConfig};

pub use release::execute_release;

/// Execute the release described by `args`, returning the exit code
pub async fn execute_command(args: &Args, config: &RuntimeConfig) -> i32 {
    if let Err(validation_error) = args.validate() {
        config.error_println(&format!("Invalid arguments: {}", validation_error));
        return 1;
    }

    match execute_release(args, config).await {
        Ok(outcome) => {
            log::debug!("Release finished: {:?}", outcome);
            0
        }
        Err(e) => {
            config.error_println(&format!("Release failed: {}", e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                config.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = config.output().indent(&format!("• {}", suggestion));
                }
            }

            1
        }
    }
}
