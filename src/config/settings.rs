//! Configuration file support for kube-os-detector

use crate::inspect::crane::DEFAULT_TOOL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub inspect: InspectSettings,

    #[serde(default)]
    pub cluster: ClusterSettings,

    #[serde(default)]
    pub behavior: Behavior,
}

/// Image inspection settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InspectSettings {
    /// Command run as `<tool> config <image>`; may carry extra arguments
    #[serde(default = "default_tool")]
    pub tool: String,
}

/// Cluster credential settings
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ClusterSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default)]
    pub in_cluster: bool,
}

/// Behavior settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Behavior {
    /// Spinner on stderr while pods are listed
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Warn before the report when the tool is not on PATH
    #[serde(default = "default_true")]
    pub check_tool: bool,
}

fn default_tool() -> String {
    DEFAULT_TOOL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for InspectSettings {
    fn default() -> Self {
        Self {
            tool: default_tool(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            show_progress: default_true(),
            check_tool: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from the first config file found, or defaults.
    /// An unreadable or malformed file is reported and ignored.
    pub fn load() -> Self {
        match Self::find_config_file() {
            Some(path) => match Self::load_from_file(&path) {
                Ok(settings) => {
                    crate::log_info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    crate::log_warn!("{:#}; using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .kube-os-detector.toml in current directory
    /// 2. ~/.config/kube-os-detector/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(".kube-os-detector.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("kube-os-detector").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Generate example config file content
    pub fn example_config() -> String {
        r#"# kube-os-detector configuration file
# Place this file at ~/.config/kube-os-detector/config.toml or .kube-os-detector.toml

[inspect]
# Invoked as `<tool> config <image>`; extra arguments are allowed
tool = "crane"
# tool = "crane --platform linux/amd64"

[cluster]
# Without kubeconfig/context (and without KUBECONFIG set) in-cluster credentials are used
# kubeconfig = "/path/to/kubeconfig"
# context = "my-context"
in_cluster = false

[behavior]
show_progress = true
check_tool = true
"#
        .to_string()
    }
}
