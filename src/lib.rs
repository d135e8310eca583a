//! kube-os-detector: report the base OS of every container image in a cluster

pub mod commands;
pub mod config;
pub mod inspect;
pub mod k8s;
pub mod report;
pub mod utils;

pub use inspect::{ImageInspector, OsLabel};
pub use k8s::ContainerImageRecord;
