use crate::document::Document;
use crate::error::ClusterQueryError;
use async_trait::async_trait;
use futures::io::AsyncBufReadExt;
use futures::stream::TryStreamExt;
use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{ApiResource, DynamicObject, GroupVersionKind, ListParams, LogParams};
use kube::{Api, Client, ResourceExt};
use tracing::debug;

/// Group, version and kind of a resource addressed without a typed schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl ResourceKind {
    /// Build from an `apiVersion` string such as `v1` or `apps/v1`.
    pub fn new(api_version: &str, kind: &str) -> Self {
        let (group, version) = match api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn stateful_set() -> Self {
        Self::new("apps/v1", "StatefulSet")
    }

    pub fn deployment() -> Self {
        Self::new("apps/v1", "Deployment")
    }

    pub fn pod() -> Self {
        Self::new("v1", "Pod")
    }

    fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk(&GroupVersionKind::gvk(
            &self.group,
            &self.version,
            &self.kind,
        ))
    }
}

/// Read-only operations the diagnostics need from the cluster.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterQueryError>;

    async fn list_objects(
        &self,
        resource: &ResourceKind,
        namespace: &str,
    ) -> Result<Vec<Document>, ClusterQueryError>;

    async fn get_object(
        &self,
        resource: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Document, ClusterQueryError>;

    async fn list_pod_names(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<String>, ClusterQueryError>;

    /// Full log of a pod, read to the end of the stream and split into lines.
    async fn pod_log(&self, namespace: &str, pod: &str) -> Result<Vec<String>, ClusterQueryError>;
}

pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for KubeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>, ClusterQueryError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|e| ClusterQueryError::list("namespaces", e))?;
        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    async fn list_objects(
        &self,
        resource: &ResourceKind,
        namespace: &str,
    ) -> Result<Vec<Document>, ClusterQueryError> {
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource.api_resource());
        let list = api.list(&ListParams::default()).await.map_err(|e| {
            ClusterQueryError::list(format!("{} in namespace {}", resource.kind, namespace), e)
        })?;
        debug!(
            "Listed {} {} object(s) in namespace {}",
            list.items.len(),
            resource.kind,
            namespace
        );
        Ok(list.items.into_iter().map(Document::from).collect())
    }

    async fn get_object(
        &self,
        resource: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Document, ClusterQueryError> {
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource.api_resource());
        api.get(name)
            .await
            .map(Document::from)
            .map_err(|e| ClusterQueryError::Get {
                kind: resource.kind.clone(),
                namespace: namespace.to_string(),
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    async fn list_pod_names(
        &self,
        namespace: &str,
        label_selector: &str,
    ) -> Result<Vec<String>, ClusterQueryError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default().labels(label_selector))
            .await
            .map_err(|e| {
                ClusterQueryError::list(
                    format!("pods ({}) in namespace {}", label_selector, namespace),
                    e,
                )
            })?;
        Ok(list.items.iter().map(|pod| pod.name_any()).collect())
    }

    async fn pod_log(&self, namespace: &str, pod: &str) -> Result<Vec<String>, ClusterQueryError> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        // The stream is owned here and closed on drop, whichever way we leave.
        let stream = api
            .log_stream(pod, &LogParams::default())
            .await
            .map_err(|e| ClusterQueryError::logs(namespace, pod, e))?;
        let lines: Vec<String> = stream
            .lines()
            .try_collect()
            .await
            .map_err(|e| ClusterQueryError::logs(namespace, pod, e))?;
        debug!("Read {} log line(s) from pod {}/{}", lines.len(), namespace, pod);
        Ok(lines)
    }
}
