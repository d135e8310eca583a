//! Utility modules for kube-os-detector

pub mod errors;
pub mod logger;
pub mod prereqs;
pub mod progress;

// Re-export commonly used items
pub use errors::DetectorError;
pub use logger::{log_error, log_info, log_warn};
pub use prereqs::{CommandPrereq, Prerequisite};
pub use progress::Spinner;
