//! Command implementations for kube-os-detector CLI

pub mod check;
pub mod report;
