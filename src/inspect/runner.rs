//! Process execution seam for the inspection tool

use std::process::{Command, ExitStatus};

/// Captured result of one tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub success: bool,
    /// Human readable exit status, e.g. `exit status: 1`
    pub status: String,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    fn from_status(status: ExitStatus, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            success: status.success(),
            status: status.to_string(),
            stdout,
            stderr,
        }
    }
}

/// Runs a program to completion and captures its output
pub trait ToolRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ToolOutput>;
}

/// Spawns a real child process and blocks until it exits
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ToolOutput> {
        tracing::debug!(program, ?args, "Running inspection tool");

        let output = Command::new(program).args(args).output()?;

        Ok(ToolOutput::from_status(
            output.status,
            output.stdout,
            output.stderr,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_runner_captures_stdout() {
        let output = ProcessRunner
            .run("sh", &["-c".to_string(), "printf '{\"os\":\"linux\"}'".to_string()])
            .unwrap();
        assert!(output.success);
        assert_eq!(output.stdout, br#"{"os":"linux"}"#.to_vec());
    }

    #[test]
    fn test_process_runner_reports_failure() {
        let output = ProcessRunner
            .run("sh", &["-c".to_string(), "echo boom >&2; exit 3".to_string()])
            .unwrap();
        assert!(!output.success);
        assert!(output.status.contains('3'));
        assert_eq!(String::from_utf8_lossy(&output.stderr).trim(), "boom");
    }

    #[test]
    fn test_process_runner_missing_program() {
        assert!(ProcessRunner.run("nonexistent-tool-xyz", &[]).is_err());
    }
}
