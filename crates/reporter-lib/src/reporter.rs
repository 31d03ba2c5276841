//! The query-format pipeline behind each invocation

use crate::error::{ReportError, Result};
use crate::locale::Locale;
use crate::models::ContainerSummary;
use crate::report::ResourceReport;
use crate::runtime::{require_name, ContainerRuntime};
use std::sync::Arc;
use tracing::{debug, info};

/// Stateless reporter over a runtime backend
///
/// Nothing is cached: every call goes to the runtime.
#[derive(Clone)]
pub struct ResourceReporter {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ResourceReporter {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    pub fn backend_name(&self) -> &'static str {
        self.runtime.backend_name()
    }

    /// All containers known to the runtime, stopped ones included
    pub async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        self.runtime.list_containers().await
    }

    /// Build the resource report for the container named exactly `name`
    ///
    /// Existence is checked against the listing first, so prefixes and ids
    /// that the runtime's inspect would otherwise accept are rejected.
    pub async fn report_resources(&self, name: &str, locale: Locale) -> Result<ResourceReport> {
        let name = require_name(name)?;

        let containers = self.runtime.list_containers().await?;
        if !containers.iter().any(|c| c.name == name) {
            debug!(container = %name, known = containers.len(), "No exact name match");
            return Err(ReportError::not_found(name));
        }

        let limits = self.runtime.inspect(name).await?;
        info!(container = %name, backend = self.backend_name(), "Inspected container");

        Ok(ResourceReport::new(limits, self.backend_name(), locale))
    }
}
