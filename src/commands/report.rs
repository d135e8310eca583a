//! Report command: list pods, inspect every image, print the table

use crate::config::Settings;
use crate::inspect::{CraneInspector, ToolCommand};
use crate::k8s::pods::enumerate;
use crate::k8s::{ClusterSource, ContainerImageRecord, KubePodLister};
use crate::report::{write_banner, write_report};
use crate::utils::prereqs::check_all;
use crate::utils::{CommandPrereq, DetectorError, Spinner};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;

/// Command-line overrides for a report run
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub in_cluster: bool,
    pub tool: Option<String>,
}

impl ReportOptions {
    /// Merge flags over the settings file
    pub fn cluster_source(&self, settings: &Settings, kubeconfig_env_set: bool) -> ClusterSource {
        ClusterSource::resolve(
            self.in_cluster || settings.cluster.in_cluster,
            self.kubeconfig
                .clone()
                .or_else(|| settings.cluster.kubeconfig.as_ref().map(PathBuf::from)),
            self.context
                .clone()
                .or_else(|| settings.cluster.context.clone()),
            kubeconfig_env_set,
        )
    }

    pub fn tool_command(&self, settings: &Settings) -> Result<ToolCommand> {
        ToolCommand::parse(self.tool.as_deref().unwrap_or(&settings.inspect.tool))
    }
}

/// Run the full report against the live cluster
pub fn run(options: ReportOptions, settings: &Settings) -> Result<()> {
    let command = options.tool_command(settings)?;
    let source = options.cluster_source(settings, std::env::var_os("KUBECONFIG").is_some());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_banner(&mut out)?;
    out.flush()?;

    if settings.behavior.check_tool {
        warn_if_tool_missing(&command);
    }

    crate::log_info!("Using {}", source);
    let records = fetch_records(&source, settings.behavior.show_progress)?;

    let inspector = CraneInspector::new(command);
    let summary = write_report(&records, &inspector, &mut out)
        .context("Failed to write report to stdout")?;

    crate::log_info!(
        "Inspected {} containers: {} errors, {} without OS metadata",
        summary.containers,
        summary.errors,
        summary.unknown
    );
    Ok(())
}

/// Build the client and list pods on a single-threaded runtime
fn fetch_records(source: &ClusterSource, show_progress: bool) -> Result<Vec<ContainerImageRecord>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let spinner = Spinner::new("Listing pods in all namespaces...", show_progress);
    let result = runtime.block_on(async {
        let client = source.connect().await?;
        enumerate(&KubePodLister::new(client)).await
    });
    spinner.finish();

    result.map_err(|e| anyhow::Error::from(DetectorError::from_enumeration(&e)))
}

/// Inspections degrade to `error` without the tool, so this only warns
fn warn_if_tool_missing(command: &ToolCommand) {
    let prereq = CommandPrereq::inspect_tool(command.program());
    let (_, missing) = check_all(&[&prereq]);
    for (name, hint) in missing {
        crate::log_warn!(
            "Inspection tool '{}' not found on PATH; every image will report error. {}",
            name,
            hint
        );
    }
}
