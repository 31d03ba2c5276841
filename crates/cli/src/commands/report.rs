//! Resource report for a single container

use anyhow::{Context, Result};
use reporter_lib::ResourceReporter;

use crate::config::Settings;
use crate::output::{print_json, OutputFormat};

/// Print the resource report for `name`
///
/// Nothing is printed to stdout unless the whole report was built.
pub async fn report_resources(
    reporter: &ResourceReporter,
    name: &str,
    settings: &Settings,
) -> Result<()> {
    let report = reporter
        .report_resources(name, settings.locale)
        .await
        .with_context(|| format!("cannot report resources for '{}'", name))?;

    match settings.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print!("{}", report.render_text()),
    }

    Ok(())
}
