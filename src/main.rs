//! kube-os-detector CLI - report the base OS of every running container image

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use kube_os_detector::commands::report::ReportOptions;
use kube_os_detector::config::Settings;
use kube_os_detector::utils::{DetectorError, logger};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kube-os-detector")]
#[command(author, version, about = "Report the base OS of container images running in a cluster", long_about = None)]
struct Cli {
    /// Verbose output (can be used multiple times: -v, -vv, -vvv)
    /// -v: INFO, -vv: DEBUG, -vvv: TRACE
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    report: ReportArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Default)]
struct ReportArgs {
    /// Path to a kubeconfig file (KUBECONFIG is honoured when unset)
    #[arg(short, long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, global = true)]
    context: Option<String>,

    /// Use the pod's service account even if a kubeconfig is available
    #[arg(long, global = true)]
    in_cluster: bool,

    /// Inspection command, invoked as `<tool> config <image>`
    #[arg(long, global = true, env = "KUBE_OS_DETECTOR_TOOL")]
    tool: Option<String>,
}

impl From<ReportArgs> for ReportOptions {
    fn from(args: ReportArgs) -> Self {
        ReportOptions {
            kubeconfig: args.kubeconfig,
            context: args.context,
            in_cluster: args.in_cluster,
            tool: args.tool,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List all pods and print the base OS of each container image (default)
    Report,

    /// Check that the inspection tool is installed
    Check,

    /// Print an example configuration file
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let settings = Settings::load();

    let result = match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => {
            kube_os_detector::commands::report::run(cli.report.into(), &settings)
        }
        Commands::Check => kube_os_detector::commands::check::check(cli.report.tool, &settings),
        Commands::Config => handle_config_command(),
        Commands::Completion { shell } => handle_completion_command(shell),
        Commands::Version => handle_version_command(),
    };

    if let Err(err) = &result
        && let Some(detector) = err.downcast_ref::<DetectorError>()
    {
        detector.display();
        std::process::exit(1);
    }

    result
}

fn handle_config_command() -> Result<()> {
    print!("{}", Settings::example_config());
    Ok(())
}

fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "kube-os-detector", &mut io::stdout());
    Ok(())
}

fn handle_version_command() -> Result<()> {
    println!("kube-os-detector {}", env!("CARGO_PKG_VERSION"));
    println!("Report the base OS of container images running in a cluster");
    Ok(())
}
