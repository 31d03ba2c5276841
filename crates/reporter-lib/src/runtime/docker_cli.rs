//! Runtime backend that shells out to the `docker` (or compatible) CLI

use super::payload::{parse_inspect, parse_ps_lines};
use super::{async_trait, require_name, ContainerRuntime};
use crate::error::{ReportError, Result};
use crate::models::{ContainerSummary, ResourceLimits};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const BACKEND: &str = "docker-cli";

/// Queries the runtime through its command-line client
pub struct DockerCli {
    binary: String,
    timeout: Duration,
}

impl DockerCli {
    /// Create a backend for `binary` (e.g. `docker` or `podman`)
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Run the CLI with `args`, failing fast on spawn errors and timeouts
    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!(binary = %self.binary, ?args, "Running runtime command");

        let child = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, child).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(ReportError::unavailable(
                BACKEND,
                format!("failed to run '{}': {}", self.binary, e),
            )),
            Err(_) => Err(ReportError::unavailable(
                BACKEND,
                format!(
                    "'{} {}' timed out after {}s",
                    self.binary,
                    args.first().unwrap_or(&""),
                    self.timeout.as_secs_f32()
                ),
            )),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerCli {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let output = self
            .run(&["ps", "--all", "--no-trunc", "--format", "{{json .}}"])
            .await?;

        if !output.status.success() {
            return Err(ReportError::unavailable(BACKEND, stderr_message(&output)));
        }

        let containers = parse_ps_lines(BACKEND, &String::from_utf8_lossy(&output.stdout))?;
        debug!(count = containers.len(), "Listed containers");
        Ok(containers)
    }

    async fn inspect(&self, name: &str) -> Result<ResourceLimits> {
        let name = require_name(name)?;
        let output = self
            .run(&["inspect", "--type", "container", name])
            .await?;

        if !output.status.success() {
            let message = stderr_message(&output);
            // docker says "No such container", podman "no such container"
            if message.to_ascii_lowercase().contains("no such") {
                return Err(ReportError::not_found(name));
            }
            return Err(ReportError::unavailable(BACKEND, message));
        }

        parse_inspect(BACKEND, &String::from_utf8_lossy(&output.stdout))
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

fn stderr_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("runtime command exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}
