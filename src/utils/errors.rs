//! Fatal errors rendered with actionable suggestions

use crate::k8s::EnumerationError;
use colored::Colorize;
use thiserror::Error;

/// Error with suggestions for the operator
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DetectorError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl DetectorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Message and suggestions as printed for the operator
    pub fn render(&self) -> String {
        let mut text = format!("{} {}\n", "Error:".red().bold(), self.message);

        if !self.suggestions.is_empty() {
            text.push('\n');
            text.push_str(&format!("{}\n", "Suggestions:".yellow().bold()));
            for suggestion in &self.suggestions {
                text.push_str(&format!("  {} {}\n", "→".blue(), suggestion));
            }
        }

        text
    }

    /// Print to stderr regardless of the log filter; stdout stays the report
    pub fn display(&self) {
        tracing::debug!(message = %self.message, "Fatal error");
        eprint!("{}", self.render());
    }

    /// Inspection tool missing from PATH
    pub fn tool_not_found(tool: &str, install_hint: &str) -> Self {
        Self::new(format!("Required tool '{}' not found", tool))
            .suggest(install_hint.to_string())
            .suggest("Ensure the tool is in your PATH")
            .suggest("Point --tool at a different inspection command")
    }

    /// Explain why pods could not be listed
    pub fn from_enumeration(err: &EnumerationError) -> Self {
        let base = Self::new(format!("Failed to list pods: {}", err));

        match err {
            EnumerationError::Config(_) => base
                .suggest("Inside a pod, check that a service account token is mounted")
                .suggest("Outside the cluster, pass --kubeconfig or set KUBECONFIG")
                .suggest("Use --context to pick a kubeconfig context"),
            EnumerationError::Authentication(_) => base
                .suggest("Verify the credentials are still valid")
                .suggest("The identity needs `list` on `pods` cluster-wide (a ClusterRole)")
                .suggest("Check with: kubectl auth can-i list pods --all-namespaces"),
            EnumerationError::Connectivity(_) => base
                .suggest("Check that the API server address is reachable")
                .suggest("Verify network policies and proxies between here and the cluster"),
            EnumerationError::Api(_) => base
                .suggest("Run with -vv for more details")
                .suggest("Check the API server health"),
        }
    }
}
