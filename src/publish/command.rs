//! Subprocess execution for the external publish tool.

use crate::cli::OutputManager;
use crate::error::{CliError, PublishError, Result};
use std::path::Path;

/// Flags whose following value is never echoed
const SENSITIVE_FLAGS: &[&str] = &["-p", "--password", "--token"];

/// Longest command echoed in full
const MAX_DISPLAY_TOKENS: usize = 7;

/// Runs external commands to completion
pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, returning its exit code.
    ///
    /// `None` means the process was terminated by a signal.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<Option<i32>>;
}

/// Render a command line for the console with secrets removed
pub fn display_command(program: &str, args: &[String]) -> String {
    let mut tokens: Vec<&str> = Vec::with_capacity(args.len() + 1);
    tokens.push(program);
    tokens.extend(args.iter().map(String::as_str));

    let mut redacted = false;
    for i in 0..tokens.len() {
        if SENSITIVE_FLAGS.contains(&tokens[i]) && i + 1 < tokens.len() {
            tokens[i + 1] = "<REDACTED>";
            redacted = true;
        }
    }

    if redacted {
        return "[command contains sensitive data, redacted]".to_string();
    }

    if tokens.len() > MAX_DISPLAY_TOKENS {
        format!("{} ...", tokens[..MAX_DISPLAY_TOKENS].join(" "))
    } else {
        tokens.join(" ")
    }
}

/// Runs commands with inherited stdio, echoing them first
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    output: OutputManager,
}

impl SystemCommandRunner {
    /// Create a runner that echoes through `output`
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<Option<i32>> {
        // Relative programs resolve against the directory they run in
        let resolved = which::which_in(program, std::env::var_os("PATH"), cwd).map_err(|_| {
            PublishError::ToolNotFound {
                program: program.to_string(),
            }
        })?;

        let _ = self
            .output
            .println(&format!("Running: {}", display_command(program, args)));

        let status = std::process::Command::new(&resolved)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| CliError::ExecutionFailed {
                command: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(status.code())
    }
}
