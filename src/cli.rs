use crate::analyzer::{AnalyzerConfig, DATA_STORE_KEYWORDS, SELF_HOSTED_INSTALL_CHECK};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

#[derive(Parser)]
#[command(name = "selfhosted-install-check")]
#[command(about = "Diagnose a self-hosted install: data stores, Core and Unit readiness")]
pub struct Cli {
    /// Kube context (defaults to the current context)
    #[arg(long)]
    pub context: Option<String>,

    /// Analyzers to run (repeatable)
    #[arg(short = 'f', long = "filter", default_values_t = [SELF_HOSTED_INSTALL_CHECK.to_string()])]
    pub filters: Vec<String>,

    /// List registered analyzers and exit
    #[arg(long)]
    pub list_analyzers: bool,

    /// Output format for the results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Namespace keyword identifying a data store (repeatable, replaces the defaults)
    #[arg(long = "data-store-keyword", default_values_t = DATA_STORE_KEYWORDS.map(String::from))]
    pub data_store_keywords: Vec<String>,

    /// Namespace whose operator logs are scanned when Core is not ready
    #[arg(long, default_value = "instana-operator")]
    pub operator_namespace: String,

    /// Label selector for operator pods
    #[arg(long, default_value = "app.kubernetes.io/component=operator")]
    pub operator_selector: String,

    /// apiVersion of the Core and Unit custom resources
    #[arg(long, default_value = "instana.io/v1beta2")]
    pub crd_api_version: String,

    /// Do not narrate checks on the console
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            data_store_keywords: self.data_store_keywords.clone(),
            operator_namespace: self.operator_namespace.clone(),
            operator_selector: self.operator_selector.clone(),
            crd_api_version: self.crd_api_version.clone(),
            ..Default::default()
        }
    }
}
