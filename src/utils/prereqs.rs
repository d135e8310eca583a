//! Prerequisite checking for external tools

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Check if the tool is available
    fn check(&self) -> Result<(), PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Prerequisite satisfied when a command resolves on `PATH`
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }

    /// Prerequisite for the configured image-inspection program
    pub fn inspect_tool(program: &str) -> Self {
        let hint = if program == "crane" {
            "Install from: https://github.com/google/go-containerregistry/tree/main/cmd/crane"
                .to_string()
        } else {
            format!("Ensure '{}' is installed and supports `config <image>`", program)
        };
        Self::new(program, hint)
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })?;
        Ok(())
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Check all prerequisites.
/// Returns (found_tools, missing_tools) where missing entries carry their hint.
pub fn check_all(prereqs: &[&dyn Prerequisite]) -> (Vec<String>, Vec<(String, String)>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();

    for prereq in prereqs {
        match prereq.check() {
            Ok(()) => found.push(prereq.name().to_string()),
            Err(PrereqError::NotFound { name, hint }) => missing.push((name, hint)),
        }
    }

    (found, missing)
}
