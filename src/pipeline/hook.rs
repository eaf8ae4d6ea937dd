//! Post-hook: run an operator-supplied command on each written output.
//!
//! The template is handed to the platform shell (`sh -c` / `cmd /C`) after
//! every `{}` is replaced with the output path. Templates come from the
//! operator and are trusted input: no quoting, sandboxing or timeout is
//! applied, and a hung command blocks its worker.

use crate::error::FileError;
use std::path::Path;
use std::process::Command;
use tracing::{error, info};

/// Token replaced with the output path.
pub const PLACEHOLDER: &str = "{}";

/// Something that can be run against a freshly written output file.
pub trait HookRunner: Send + Sync {
    fn run(&self, output: &Path) -> Result<(), FileError>;
}

/// Runs a command template through the system shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellHook {
    template: String,
}

impl ShellHook {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The command line for `output`, with every placeholder substituted.
    pub fn render(&self, output: &Path) -> String {
        self.template
            .replace(PLACEHOLDER, &output.to_string_lossy())
    }
}

impl HookRunner for ShellHook {
    fn run(&self, output: &Path) -> Result<(), FileError> {
        let command = self.render(output);
        let fail = |detail: String| {
            error!(
                "Error executing shell command '{}' on {}: {}",
                command,
                output.display(),
                detail
            );
            FileError::HookFailed {
                command: command.clone(),
                path: output.to_path_buf(),
                detail,
            }
        };

        let status = shell(&command)
            .status()
            .map_err(|e| fail(format!("failed to launch: {e}")))?;

        if !status.success() {
            return Err(fail(status.to_string()));
        }

        info!("Executed shell command on {}", output.display());
        Ok(())
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}
