mod analyzer;
mod cli;
mod custom_resource;
mod document;
mod error;
mod kubernetes;
mod namespaces;
mod operator_logs;
mod types;
mod utils;
mod workloads;

use clap::Parser;
use crossterm::style::Stylize;
use kube::{Client, config};
use std::collections::HashSet;
use tracing::{error, info};

use analyzer::{AnalyzerRegistry, SelfHostedInstallAnalyzer};
use cli::{Cli, OutputFormat};
use kubernetes::KubeCluster;
use types::Report;
use utils::{Console, Narration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Narration must not interleave with machine-readable output on stdout
    let narration = match (cli.quiet, cli.output) {
        (true, _) => Narration::Off,
        (false, OutputFormat::Text) => Narration::Stdout,
        (false, _) => Narration::Stderr,
    };
    let console = Console::new(narration);

    let client = initialize_client(cli.context.as_deref()).await?;

    let mut registry = AnalyzerRegistry::new();
    registry.register(Box::new(SelfHostedInstallAnalyzer::new(
        KubeCluster::new(client),
        cli.analyzer_config(),
        console,
    )));

    let active_filters: HashSet<String> = cli.filters.iter().cloned().collect();

    if cli.list_analyzers {
        for name in registry.names() {
            let marker = if active_filters.contains(name) { "active" } else { "inactive" };
            println!("{} ({})", name, marker);
        }
        return Ok(());
    }

    let mut reports = Vec::new();
    for analyzer in registry.active(&active_filters) {
        info!("Running analyzer {}", analyzer.name());
        let results = analyzer.analyze().await.inspect_err(|e| {
            error!("Analyzer {} failed: {}", analyzer.name(), e);
        })?;
        reports.push(Report {
            analyzer: analyzer.name().to_string(),
            generated_at: chrono::Utc::now(),
            results,
        });
    }

    if reports.is_empty() {
        anyhow::bail!(
            "No analyzer matches the active filters {:?}; registered: {:?}",
            cli.filters,
            registry.names().collect::<Vec<_>>()
        );
    }

    print_reports(&reports, cli.output)
}

async fn initialize_client(context: Option<&str>) -> anyhow::Result<Client> {
    let client = match context {
        Some(ctx) => {
            let config = config::Config::from_kubeconfig(&config::KubeConfigOptions {
                context: Some(ctx.to_string()),
                ..Default::default()
            })
            .await
            .map_err(|e| anyhow::anyhow!("Context '{}' not found in kubeconfig: {}", ctx, e))?;
            info!("Using context: {}", ctx);
            Client::try_from(config)?
        }
        None => {
            let config = config::Config::infer().await?;
            info!("Using current context");
            Client::try_from(config)?
        }
    };
    Ok(client)
}

fn print_reports(reports: &[Report], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(reports)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            for report in reports {
                println!();
                if report.results.is_empty() {
                    println!("{}", format!("{}: no problems found", report.analyzer).green());
                    continue;
                }
                println!(
                    "{}",
                    format!("{}: {} problem(s)", report.analyzer, report.results.len()).red()
                );
                for (i, result) in report.results.iter().enumerate() {
                    let subject = match (result.kind.is_empty(), result.name.is_empty()) {
                        (true, _) => "query".to_string(),
                        (false, true) => result.kind.clone(),
                        (false, false) => format!("{}/{}", result.kind, result.name),
                    };
                    println!("{} {}", format!("{}:", i).bold(), subject);
                    for failure in &result.failures {
                        println!("- {}", failure.text);
                    }
                }
            }
        }
    }
    Ok(())
}
