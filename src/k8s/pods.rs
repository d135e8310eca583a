//! Pod enumeration across all namespaces

use super::EnumerationError;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::{Client, ResourceExt};
use std::future::Future;

/// One container of one pod
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerImageRecord {
    pub namespace: String,
    pub pod_name: String,
    pub image: String,
}

/// Source of pod objects
pub trait PodLister {
    /// List every pod in every namespace
    fn list_pods(&self) -> impl Future<Output = Result<Vec<Pod>, EnumerationError>>;
}

/// Lists pods through the Kubernetes API
pub struct KubePodLister {
    api: Api<Pod>,
}

impl KubePodLister {
    pub fn new(client: Client) -> Self {
        Self {
            api: Api::all(client),
        }
    }
}

impl PodLister for KubePodLister {
    async fn list_pods(&self) -> Result<Vec<Pod>, EnumerationError> {
        let pods = self
            .api
            .list(&ListParams::default())
            .await
            .map_err(|e| EnumerationError::from_kube(&e))?;

        tracing::debug!(count = pods.items.len(), "Listed pods");
        Ok(pods.items)
    }
}

/// Records for every container in `spec.containers`, in declaration order
pub fn records_for_pod(pod: &Pod) -> Vec<ContainerImageRecord> {
    let namespace = pod.namespace().unwrap_or_default();
    let pod_name = pod.name_any();

    let Some(spec) = pod.spec.as_ref() else {
        return Vec::new();
    };

    spec.containers
        .iter()
        .map(|container| ContainerImageRecord {
            namespace: namespace.clone(),
            pod_name: pod_name.clone(),
            image: container.image.clone().unwrap_or_default(),
        })
        .collect()
}

/// Flatten pods into container records, preserving listing order
pub fn flatten_pods<'a>(pods: impl IntoIterator<Item = &'a Pod>) -> Vec<ContainerImageRecord> {
    pods.into_iter().flat_map(records_for_pod).collect()
}

/// List all pods and flatten them into records
pub async fn enumerate<L: PodLister>(
    lister: &L,
) -> Result<Vec<ContainerImageRecord>, EnumerationError> {
    let pods = lister.list_pods().await?;
    let records = flatten_pods(&pods);
    crate::log_info!(
        "Found {} containers across {} pods",
        records.len(),
        pods.len()
    );
    Ok(records)
}
