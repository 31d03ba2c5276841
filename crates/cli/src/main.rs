//! Container Resource Reporter CLI
//!
//! Lists the containers known to the runtime, or prints the configured
//! memory and CPU limits of one container.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use reporter_lib::{Locale, ResourceReporter};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Container Resource Reporter CLI
#[derive(Parser)]
#[command(name = "resreport")]
#[command(author, version, about = "Container Resource Reporter: show configured memory and CPU limits", long_about = None)]
pub struct Cli {
    /// Container name to report on (lists all containers when omitted)
    pub container: Option<String>,

    /// Engine host; http:// and tcp:// URLs query the REST API directly
    #[arg(long, env = "DOCKER_HOST")]
    pub host: Option<String>,

    /// Runtime CLI binary used when no HTTP host is set (e.g. docker, podman)
    #[arg(long)]
    pub runtime_bin: Option<String>,

    /// Timeout in seconds for each runtime query
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Report language (en, ru)
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so report output on stdout stays clean
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("reporter_lib=debug,resreport=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = config::Settings::load()?;
    settings.merge_cli(&cli);

    if !settings.color {
        colored::control::set_override(false);
    }

    let runtime = reporter_lib::connect(&settings.runtime_config()?)?;
    let reporter = ResourceReporter::new(runtime);
    tracing::debug!(backend = reporter.backend_name(), "Connected to runtime");

    match cli.container.as_deref() {
        None => commands::list::list_containers(&reporter, &settings).await,
        Some(name) => commands::report::report_resources(&reporter, name, &settings).await,
    }
}
