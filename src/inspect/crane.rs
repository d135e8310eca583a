//! Inspection through `crane config <image>` (or any tool with the same contract)

use super::{ImageInspector, InspectError, OsLabel, ProcessRunner, ToolRunner};
use anyhow::{Result, anyhow};
use serde_json::Value;
use std::fmt;

/// Default inspection program
pub const DEFAULT_TOOL: &str = "crane";

/// Program plus leading arguments, parsed from a shell-word string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Parse e.g. `crane --platform linux/arm64`
    pub fn parse(command: &str) -> Result<Self> {
        let mut words = shell_words::split(command)
            .map_err(|e| anyhow!("Invalid inspection command '{}': {}", command, e))?;

        if words.is_empty() {
            return Err(anyhow!("Inspection command is empty"));
        }

        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for inspecting `image`
    pub fn config_args(&self, image: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("config".to_string());
        args.push(image.to_string());
        args
    }
}

impl Default for ToolCommand {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOL.to_string(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(&self.program).chain(self.args.iter());
        write!(f, "{}", shell_words::join(words))
    }
}

/// Extract the OS label from an image config document
pub fn parse_config(image: &str, stdout: &str) -> Result<OsLabel, InspectError> {
    let value: Value = serde_json::from_str(stdout).map_err(|source| InspectError::Parse {
        image: image.to_string(),
        source,
    })?;

    let config = value.as_object().ok_or_else(|| InspectError::NotAnObject {
        image: image.to_string(),
    })?;

    Ok(match config.get("os") {
        None | Some(Value::Null) => OsLabel::Unknown,
        Some(Value::String(os)) => OsLabel::Os(os.clone()),
        Some(other) => OsLabel::Os(other.to_string()),
    })
}

/// Inspector that shells out once per image
pub struct CraneInspector<R = ProcessRunner> {
    command: ToolCommand,
    runner: R,
}

impl CraneInspector {
    pub fn new(command: ToolCommand) -> Self {
        Self::with_runner(command, ProcessRunner)
    }
}

impl<R: ToolRunner> CraneInspector<R> {
    pub fn with_runner(command: ToolCommand, runner: R) -> Self {
        Self { command, runner }
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Inspect `image`, keeping the cause of any failure
    pub fn try_inspect(&self, image: &str) -> Result<OsLabel, InspectError> {
        let program = self.command.program();
        let output = self
            .runner
            .run(program, &self.command.config_args(image))
            .map_err(|source| InspectError::Spawn {
                program: program.to_string(),
                image: image.to_string(),
                source,
            })?;

        if !output.success {
            return Err(InspectError::CommandFailed {
                image: image.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| InspectError::InvalidUtf8 {
            image: image.to_string(),
        })?;

        parse_config(image, &stdout)
    }
}

impl<R: ToolRunner> ImageInspector for CraneInspector<R> {
    fn inspect(&self, image: &str) -> OsLabel {
        match self.try_inspect(image) {
            Ok(label) => {
                tracing::debug!(image, %label, "Inspected image");
                label
            }
            Err(e) => {
                crate::log_error!("{}", e);
                OsLabel::Error
            }
        }
    }
}
