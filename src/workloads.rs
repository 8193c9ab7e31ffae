//! Readiness of StatefulSets, Deployments and Pods in one namespace.
//!
//! Only unhealthy objects become results; healthy ones are narrated on the
//! console and otherwise dropped. A failed listing becomes a single result
//! carrying the query error so sibling checks keep running.

use crate::document::Document;
use crate::kubernetes::{ClusterApi, ResourceKind};
use crate::types::{DiagnosticResult, Failure};
use crate::utils::Console;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    StatefulSet,
    Deployment,
    Pod,
}

/// What a single object looked like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    pub ready: bool,
    /// One-line summary for the console.
    pub summary: String,
}

impl WorkloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::StatefulSet => "StatefulSet",
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::Pod => "Pod",
        }
    }

    pub fn resource(&self) -> ResourceKind {
        match self {
            WorkloadKind::StatefulSet => ResourceKind::stateful_set(),
            WorkloadKind::Deployment => ResourceKind::deployment(),
            WorkloadKind::Pod => ResourceKind::pod(),
        }
    }

    /// Missing or mistyped fields fall back to the not-ready value. Zero
    /// desired replicas with no status therefore counts as ready.
    pub fn readiness(&self, doc: &Document) -> Readiness {
        match self {
            WorkloadKind::StatefulSet => {
                let ready = doc.nested_i64(&["status", "readyReplicas"]).or(0);
                let desired = doc.nested_i64(&["spec", "replicas"]).or(0);
                Readiness {
                    ready: ready == desired,
                    summary: format!(
                        "StatefulSet: {}, ReadyReplicas: {}/{}",
                        doc.name, ready, desired
                    ),
                }
            }
            WorkloadKind::Deployment => {
                let available = doc.nested_i64(&["status", "availableReplicas"]).or(0);
                let desired = doc.nested_i64(&["spec", "replicas"]).or(0);
                Readiness {
                    ready: available == desired,
                    summary: format!(
                        "Deployment: {}, AvailableReplicas: {}/{}",
                        doc.name, available, desired
                    ),
                }
            }
            WorkloadKind::Pod => {
                let phase = doc.nested_str(&["status", "phase"]).or("Unknown");
                Readiness {
                    ready: phase == "Running",
                    summary: format!("Pod: {}, Status: {}", doc.name, phase),
                }
            }
        }
    }

    fn failure_text(&self, namespace: &str, name: &str) -> String {
        match self {
            WorkloadKind::StatefulSet => {
                format!("In namespace {}, statefulSet {} is not running", namespace, name)
            }
            WorkloadKind::Deployment => {
                format!("In namespace {}, deployment {} is not available", namespace, name)
            }
            WorkloadKind::Pod => {
                format!("In namespace {}, pod {} is not running", namespace, name)
            }
        }
    }
}

pub async fn check_workloads<C: ClusterApi + ?Sized>(
    cluster: &C,
    console: &Console,
    kind: WorkloadKind,
    namespace: &str,
) -> Vec<DiagnosticResult> {
    let objects = match cluster.list_objects(&kind.resource(), namespace).await {
        Ok(objects) => objects,
        Err(e) => {
            warn!("{}", e);
            return vec![DiagnosticResult::query_error(e.to_string())];
        }
    };

    let mut results = Vec::new();
    for doc in &objects {
        let readiness = kind.readiness(doc);
        if readiness.ready {
            console.healthy(readiness.summary);
        } else {
            console.unhealthy(readiness.summary);
            results.push(DiagnosticResult::new(
                kind.as_str(),
                doc.name.clone(),
                Failure::new(kind.failure_text(namespace, &doc.name)),
            ));
        }
    }
    results
}

pub async fn check_stateful_sets<C: ClusterApi + ?Sized>(
    cluster: &C,
    console: &Console,
    namespace: &str,
) -> Vec<DiagnosticResult> {
    check_workloads(cluster, console, WorkloadKind::StatefulSet, namespace).await
}

pub async fn check_deployments<C: ClusterApi + ?Sized>(
    cluster: &C,
    console: &Console,
    namespace: &str,
) -> Vec<DiagnosticResult> {
    check_workloads(cluster, console, WorkloadKind::Deployment, namespace).await
}

pub async fn check_pods<C: ClusterApi + ?Sized>(
    cluster: &C,
    console: &Console,
    namespace: &str,
) -> Vec<DiagnosticResult> {
    check_workloads(cluster, console, WorkloadKind::Pod, namespace).await
}
