//! Container listing, shown when no container is named

use anyhow::{Context, Result};
use clap::CommandFactory;
use reporter_lib::{locale::Label, render_container_table, ResourceReporter};

use crate::config::Settings;
use crate::output::{print_info, print_json, print_warning, OutputFormat};
use crate::Cli;

/// List all containers, then print usage
pub async fn list_containers(reporter: &ResourceReporter, settings: &Settings) -> Result<()> {
    let containers = reporter
        .list_containers()
        .await
        .context("failed to list containers")?;

    let usage = Cli::command().render_usage();

    match settings.format {
        OutputFormat::Json => {
            print_json(&containers)?;
            // keep stdout parseable
            eprintln!("{}", usage);
        }
        OutputFormat::Table => {
            if containers.is_empty() {
                print_warning(settings.locale.label(Label::NoContainers));
            }
            println!("{}", render_container_table(&containers, settings.locale));
            println!();
            println!("{}", usage);
            print_info(settings.locale.label(Label::ListHint));
        }
    }

    Ok(())
}
