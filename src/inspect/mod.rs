//! Image inspection
//!
//! An [`ImageInspector`] turns an image reference into an [`OsLabel`]. It never
//! fails: any problem is logged and reported as [`OsLabel::Error`].

pub mod crane;
pub mod runner;

pub use crane::{CraneInspector, ToolCommand};
pub use runner::{ProcessRunner, ToolOutput, ToolRunner};

use std::fmt;
use thiserror::Error;

/// Base OS of an image as reported by its config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsLabel {
    Os(String),
    /// Config was readable but carried no `os`
    Unknown,
    /// Inspection failed
    Error,
}

impl fmt::Display for OsLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsLabel::Os(os) => write!(f, "{}", os),
            OsLabel::Unknown => write!(f, "unknown"),
            OsLabel::Error => write!(f, "error"),
        }
    }
}

/// Capability to look up the base OS of an image
pub trait ImageInspector {
    fn inspect(&self, image: &str) -> OsLabel;
}

impl<T: ImageInspector + ?Sized> ImageInspector for &T {
    fn inspect(&self, image: &str) -> OsLabel {
        (**self).inspect(image)
    }
}

/// Why an inspection produced [`OsLabel::Error`]
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("failed to run {program} for {image}: {source}")]
    Spawn {
        program: String,
        image: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error inspecting image {image} ({status}): {stderr}")]
    CommandFailed {
        image: String,
        status: String,
        stderr: String,
    },

    #[error("failed to read output for {image}: not valid UTF-8")]
    InvalidUtf8 { image: String },

    #[error("failed to parse inspection output for {image}: {source}")]
    Parse {
        image: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse inspection output for {image}: expected a JSON object")]
    NotAnObject { image: String },
}
