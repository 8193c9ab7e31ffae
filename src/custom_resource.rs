use crate::document::Field;
use crate::error::ClusterQueryError;
use crate::kubernetes::{ClusterApi, ResourceKind};
use crate::types::{DiagnosticResult, Failure};
use crate::utils::Console;
use tracing::debug;

pub const READY: &str = "Ready";

/// Find the instance of `resource` in `namespace` whose name contains
/// `keyword` and check that `status.componentsStatus` is `Ready`.
///
/// An empty vector means ready. Only a failed listing is an error; a failed
/// fetch, a missing instance and a non-ready status are all results.
pub async fn check_custom_resource<C: ClusterApi + ?Sized>(
    cluster: &C,
    console: &Console,
    keyword: &str,
    resource: &ResourceKind,
    namespace: &str,
) -> Result<Vec<DiagnosticResult>, ClusterQueryError> {
    console.namespace(namespace);

    let mut names: Vec<String> = cluster
        .list_objects(resource, namespace)
        .await?
        .into_iter()
        .map(|doc| doc.name)
        .collect();
    names.sort();

    let Some(name) = names.into_iter().find(|name| name.contains(keyword)) else {
        console.unhealthy(format!(
            "Custom Resource: no {} matching {:?} found",
            resource.kind, keyword
        ));
        return Ok(vec![DiagnosticResult::new(
            resource.kind.clone(),
            String::new(),
            Failure::new(format!(
                "In namespace {}, no {} resource with a name containing {:?} was found",
                namespace, resource.kind, keyword
            )),
        )]);
    };
    debug!("Resolved {} {:?} in namespace {}", resource.kind, name, namespace);

    let doc = match cluster.get_object(resource, namespace, &name).await {
        Ok(doc) => doc,
        Err(e) => return Ok(vec![DiagnosticResult::query_error(e.to_string())]),
    };

    let reason = match doc.nested_str(&["status", "componentsStatus"]) {
        Field::Present(READY) => {
            console.healthy(format!("Custom Resource: {} status: {}", name, READY));
            return Ok(Vec::new());
        }
        Field::Present(other) => format!("componentsStatus is {:?}", other),
        Field::Absent => "componentsStatus is not set".to_string(),
        Field::WrongType => "componentsStatus is not a string".to_string(),
    };

    console.unhealthy(format!("Custom Resource: {} status: NotReady", name));
    Ok(vec![DiagnosticResult::new(
        resource.kind.clone(),
        name.clone(),
        Failure::new(format!(
            "In namespace {}, {} is not ready: {}",
            namespace, name, reason
        )),
    )])
}
