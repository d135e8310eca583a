//! Cluster client construction
//!
//! Credentials are resolved once at startup into a [`ClusterSource`] and the
//! resulting [`Client`] is handed to whoever needs it.

use super::EnumerationError;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::PathBuf;

/// Where cluster credentials come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterSource {
    /// Service account token and CA mounted into the pod
    InCluster,
    /// A kubeconfig file. `path: None` follows `KUBECONFIG` / `~/.kube/config`.
    Kubeconfig {
        path: Option<PathBuf>,
        context: Option<String>,
    },
}

impl ClusterSource {
    /// Pick a credential source.
    ///
    /// `in_cluster` wins outright. Otherwise an explicit kubeconfig path, a
    /// context name, or a `KUBECONFIG` environment variable selects kubeconfig
    /// loading. With none of those the tool assumes it runs inside the cluster.
    pub fn resolve(
        in_cluster: bool,
        kubeconfig: Option<PathBuf>,
        context: Option<String>,
        kubeconfig_env_set: bool,
    ) -> Self {
        if in_cluster {
            return ClusterSource::InCluster;
        }

        if kubeconfig.is_some() || context.is_some() || kubeconfig_env_set {
            return ClusterSource::Kubeconfig {
                path: kubeconfig,
                context,
            };
        }

        ClusterSource::InCluster
    }

    /// Build a client for this source
    pub async fn connect(&self) -> Result<Client, EnumerationError> {
        let config = match self {
            ClusterSource::InCluster => {
                crate::log_info!("Loading in-cluster credentials");
                Config::incluster().map_err(|e| EnumerationError::Config(e.to_string()))?
            }
            ClusterSource::Kubeconfig { path, context } => {
                let options = KubeConfigOptions {
                    context: context.clone(),
                    ..Default::default()
                };

                match path {
                    Some(path) => {
                        crate::log_info!("Loading kubeconfig from {}", path.display());
                        let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                            EnumerationError::Config(format!("{}: {}", path.display(), e))
                        })?;
                        Config::from_custom_kubeconfig(kubeconfig, &options)
                            .await
                            .map_err(|e| EnumerationError::Config(e.to_string()))?
                    }
                    None => {
                        crate::log_info!("Loading default kubeconfig");
                        Config::from_kubeconfig(&options)
                            .await
                            .map_err(|e| EnumerationError::Config(e.to_string()))?
                    }
                }
            }
        };

        tracing::debug!(cluster_url = %config.cluster_url, "Cluster config resolved");

        Client::try_from(config).map_err(|e| EnumerationError::from_kube(&e))
    }
}

impl std::fmt::Display for ClusterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterSource::InCluster => write!(f, "in-cluster credentials"),
            ClusterSource::Kubeconfig { path, context } => {
                match path {
                    Some(p) => write!(f, "kubeconfig {}", p.display())?,
                    None => write!(f, "default kubeconfig")?,
                }
                if let Some(ctx) = context {
                    write!(f, " (context {})", ctx)?;
                }
                Ok(())
            }
        }
    }
}
