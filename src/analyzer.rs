use crate::custom_resource::check_custom_resource;
use crate::error::ClusterQueryError;
use crate::kubernetes::{ClusterApi, ResourceKind};
use crate::namespaces::resolve_namespaces;
use crate::operator_logs::operator_log_excerpt;
use crate::types::{DiagnosticResult, Failure};
use crate::utils::Console;
use crate::workloads::{check_deployments, check_pods, check_stateful_sets};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

pub const SELF_HOSTED_INSTALL_CHECK: &str = "SelfHostedInstallCheck";

pub const DATA_STORE_KEYWORDS: [&str; 7] = [
    "kafka",
    "elasticsearch",
    "postgres",
    "clickhouse",
    "cassandra",
    "beeinstana",
    "instana-operator",
];

#[async_trait]
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self) -> Result<Vec<DiagnosticResult>, ClusterQueryError>;

    fn is_active(&self, active_filters: &HashSet<String>) -> bool {
        active_filters.contains(self.name())
    }
}

/// Analyzers known to this process, keyed by name.
#[derive(Default)]
pub struct AnalyzerRegistry {
    analyzers: BTreeMap<String, Box<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registering a name twice replaces the earlier analyzer.
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        let name = analyzer.name().to_string();
        if self.analyzers.insert(name.clone(), analyzer).is_some() {
            warn!("Analyzer {} registered twice, keeping the latest", name);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.analyzers.keys().map(String::as_str)
    }

    /// Analyzers enabled by `active_filters`, in name order.
    pub fn active<'a>(
        &'a self,
        active_filters: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a dyn Analyzer> + 'a {
        self.analyzers
            .values()
            .map(|a| a.as_ref())
            .filter(move |a| a.is_active(active_filters))
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub data_store_keywords: Vec<String>,
    pub core_keyword: String,
    pub unit_keyword: String,
    pub operator_namespace: String,
    pub operator_selector: String,
    pub crd_api_version: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_store_keywords: DATA_STORE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            core_keyword: "core".to_string(),
            unit_keyword: "unit".to_string(),
            operator_namespace: "instana-operator".to_string(),
            operator_selector: "app.kubernetes.io/component=operator".to_string(),
            crd_api_version: "instana.io/v1beta2".to_string(),
        }
    }
}

/// Health of a self-hosted install: data-store workloads, then the Core
/// custom resource (with operator log context when it is not ready), then
/// the Unit custom resource.
pub struct SelfHostedInstallAnalyzer<C> {
    cluster: C,
    config: AnalyzerConfig,
    console: Console,
}

impl<C: ClusterApi> SelfHostedInstallAnalyzer<C> {
    pub fn new(cluster: C, config: AnalyzerConfig, console: Console) -> Self {
        Self {
            cluster,
            config,
            console,
        }
    }

    async fn check_data_stores(&self) -> Result<Vec<DiagnosticResult>, ClusterQueryError> {
        let mut results = Vec::new();
        for ns in resolve_namespaces(&self.cluster, &self.config.data_store_keywords).await? {
            self.console.namespace(&ns);
            results.extend(check_stateful_sets(&self.cluster, &self.console, &ns).await);
            results.extend(check_deployments(&self.cluster, &self.console, &ns).await);
            results.extend(check_pods(&self.cluster, &self.console, &ns).await);
        }
        Ok(results)
    }

    async fn check_core(&self) -> Result<Vec<DiagnosticResult>, ClusterQueryError> {
        let Some(ns) = self.subsystem_namespace(&self.config.core_keyword).await? else {
            return Ok(Vec::new());
        };
        let resource = ResourceKind::new(&self.config.crd_api_version, "Core");
        let mut results = check_custom_resource(
            &self.cluster,
            &self.console,
            &self.config.core_keyword,
            &resource,
            &ns,
        )
        .await?;

        if let Some(core) = results.first_mut().filter(|r| r.has_failures()) {
            let namespace = &self.config.operator_namespace;
            let excerpt =
                operator_log_excerpt(&self.cluster, namespace, &self.config.operator_selector)
                    .await?;
            core.failures.push(Failure::new(format!(
                "Core is not ready\nExternal {} Log:\n{}",
                namespace, excerpt
            )));
        }
        Ok(results)
    }

    async fn check_unit(&self) -> Result<Vec<DiagnosticResult>, ClusterQueryError> {
        let Some(ns) = self.subsystem_namespace(&self.config.unit_keyword).await? else {
            return Ok(Vec::new());
        };
        let resource = ResourceKind::new(&self.config.crd_api_version, "Unit");
        check_custom_resource(
            &self.cluster,
            &self.console,
            &self.config.unit_keyword,
            &resource,
            &ns,
        )
        .await
    }

    /// The first (in name order) namespace matching `keyword`.
    async fn subsystem_namespace(&self, keyword: &str) -> Result<Option<String>, ClusterQueryError> {
        let matched = resolve_namespaces(&self.cluster, &[keyword]).await?;
        if matched.len() > 1 {
            warn!(
                "{} namespaces match {:?} ({}), using {}",
                matched.len(),
                keyword,
                matched.join(", "),
                matched[0]
            );
        }
        Ok(matched.into_iter().next())
    }
}

#[async_trait]
impl<C: ClusterApi> Analyzer for SelfHostedInstallAnalyzer<C> {
    fn name(&self) -> &str {
        SELF_HOSTED_INSTALL_CHECK
    }

    async fn analyze(&self) -> Result<Vec<DiagnosticResult>, ClusterQueryError> {
        let mut results = self.check_data_stores().await?;
        results.extend(self.check_core().await?);
        results.extend(self.check_unit().await?);
        info!("{} finished with {} result(s)", self.name(), results.len());
        Ok(results)
    }
}
