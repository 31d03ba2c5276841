//! Runtime backend for the Docker Engine REST API

use super::payload::{parse_engine_list, parse_inspect};
use super::{async_trait, require_name, ContainerRuntime};
use crate::error::{error_chain, ReportError, Result};
use crate::models::{ContainerSummary, ResourceLimits};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

const BACKEND: &str = "engine-api";

/// Queries the runtime over HTTP
pub struct EngineApi {
    client: Client,
    base_url: Url,
}

impl EngineApi {
    /// Create a new Engine API client
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ReportError::unavailable(BACKEND, error_chain(&e)))?;

        let base_url = Url::parse(base_url).map_err(|e| {
            ReportError::usage(format!("invalid engine host '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ReportError::usage(format!(
                "invalid engine host '{}'",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Build `<base>/<segments...>` with each segment percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request, returning status and body
    async fn get(&self, url: Url) -> Result<(StatusCode, String)> {
        debug!(url = %url, "Querying engine API");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ReportError::unavailable(BACKEND, error_chain(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReportError::unavailable(BACKEND, error_chain(&e)))?;
        Ok((status, body))
    }
}

#[async_trait]
impl ContainerRuntime for EngineApi {
    async fn list_containers(&self) -> Result<Vec<ContainerSummary>> {
        let mut url = self.endpoint(&["containers", "json"]);
        url.query_pairs_mut().append_pair("all", "true");

        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(ReportError::unavailable(
                BACKEND,
                format!("API error ({}): {}", status, body.trim()),
            ));
        }

        parse_engine_list(BACKEND, &body)
    }

    async fn inspect(&self, name: &str) -> Result<ResourceLimits> {
        let name = require_name(name)?;
        let (status, body) = self
            .get(self.endpoint(&["containers", name, "json"]))
            .await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ReportError::not_found(name));
        }
        if !status.is_success() {
            return Err(ReportError::unavailable(
                BACKEND,
                format!("API error ({}): {}", status, body.trim()),
            ));
        }

        parse_inspect(BACKEND, &body)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
