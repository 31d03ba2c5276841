//! Access to the container runtime
//!
//! The runtime is treated as an opaque, read-only capability behind the
//! [`ContainerRuntime`] trait. Two backends are provided: the runtime CLI
//! (`docker`/`podman`, the default) and the Docker Engine REST API when a
//! TCP/HTTP host is configured. Both share one payload parser, so the
//! zero-means-unlimited conversion happens in exactly one place.

mod docker_cli;
mod engine_api;
mod payload;


pub use docker_cli::DockerCli;
pub use engine_api::EngineApi;
pub use payload::{parse_engine_list, parse_inspect, parse_ps_lines};

use crate::error::{ReportError, Result};
use crate::models::{ContainerSummary, ResourceLimits};
use std::sync::Arc;
use std::time::Duration;

pub use async_trait::async_trait;

/// Trait for container runtime inspection backends
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// List all containers, including stopped ones
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>>;

    /// Inspect the configured limits of one container
    async fn inspect(&self, name: &str) -> Result<ResourceLimits>;

    /// Short backend identifier used in logs and reports
    fn backend_name(&self) -> &'static str;
}

/// Settings for connecting to the runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Engine host; `http://` and `tcp://` select the REST backend
    pub host: Option<String>,
    /// CLI binary used otherwise
    pub runtime_bin: String,
    /// Upper bound for every runtime call
    pub timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            host: None,
            runtime_bin: "docker".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Create the appropriate backend for the configured host
pub fn connect(config: &RuntimeConfig) -> Result<Arc<dyn ContainerRuntime>> {
    match config.host.as_deref().and_then(engine_url) {
        Some(url) => {
            tracing::info!(host = %url, "Using Docker Engine API backend");
            Ok(Arc::new(EngineApi::new(&url, config.timeout)?))
        }
        None => {
            if let Some(host) = &config.host {
                tracing::debug!(host = %host, "Host is not HTTP; delegating to runtime CLI");
            }
            tracing::info!(binary = %config.runtime_bin, "Using runtime CLI backend");
            Ok(Arc::new(DockerCli::new(
                config.runtime_bin.clone(),
                config.timeout,
            )))
        }
    }
}

/// Map a configured host to an HTTP base URL, if it names one
fn engine_url(host: &str) -> Option<String> {
    let host = host.trim();
    if let Some(rest) = host.strip_prefix("tcp://") {
        Some(format!("http://{}", rest))
    } else if host.starts_with("http://") || host.starts_with("https://") {
        Some(host.to_string())
    } else {
        None
    }
}

/// Reject a blank container name before it reaches the runtime
///
/// The name is returned untouched; padded names must not match.
pub(crate) fn require_name(name: &str) -> Result<&str> {
    if name.trim().is_empty() {
        return Err(ReportError::usage("container name must not be empty"));
    }
    Ok(name)
}
