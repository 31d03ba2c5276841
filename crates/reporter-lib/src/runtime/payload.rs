//! Parsing of runtime payloads into the internal model
//!
//! This is the single boundary where the runtime's sentinel values
//! (`null`, absent, `0`, `-1`) become explicit [`Limit`] states.

use crate::error::{ReportError, Result};
use crate::models::{ContainerSummary, Limit, ResourceLimits};
use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

/// `Names` is a comma-separated string for docker, an array for podman
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PsNames {
    Joined(String),
    List(Vec<String>),
}

impl PsNames {
    fn primary(&self) -> &str {
        let name = match self {
            Self::Joined(joined) => joined.split(',').next().unwrap_or_default(),
            Self::List(names) => names.first().map(String::as_str).unwrap_or_default(),
        };
        name.trim().trim_start_matches('/')
    }
}

/// One line of `docker ps --format '{{json .}}'`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PsLine {
    names: PsNames,
    #[serde(default)]
    status: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    state: String,
}

/// One element of `GET /containers/json`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EngineSummary {
    #[serde(default)]
    names: Vec<String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    state: String,
}

/// Parse the line-delimited JSON emitted by `ps --format '{{json .}}'`
pub fn parse_ps_lines(backend: &'static str, stdout: &str) -> Result<Vec<ContainerSummary>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let row: PsLine = serde_json::from_str(line).map_err(|e| {
                ReportError::unavailable(backend, format!("malformed listing line {line:?}: {e}"))
            })?;
            Ok(ContainerSummary {
                name: row.names.primary().to_string(),
                status: row.status,
                image: row.image,
                state: row.state,
            })
        })
        .collect()
}

/// Parse the body of `GET /containers/json?all=true`
pub fn parse_engine_list(backend: &'static str, body: &str) -> Result<Vec<ContainerSummary>> {
    let rows: Vec<EngineSummary> = serde_json::from_str(body)
        .map_err(|e| ReportError::unavailable(backend, format!("malformed listing: {e}")))?;

    Ok(rows
        .into_iter()
        .map(|row| ContainerSummary {
            name: row
                .names
                .first()
                .map(|n| n.trim_start_matches('/').to_string())
                .unwrap_or_default(),
            status: row.status,
            image: row.image,
            state: row.state,
        })
        .collect())
}

/// Parse an inspect payload: either the CLI's one-element array or the
/// Engine API's bare object.
pub fn parse_inspect(backend: &'static str, payload: &str) -> Result<ResourceLimits> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ReportError::unavailable(backend, format!("malformed inspect output: {e}")))?;

    let object = match &value {
        Value::Array(items) => items.first().and_then(Value::as_object),
        Value::Object(map) => Some(map),
        _ => None,
    }
    .ok_or_else(|| {
        ReportError::unavailable(backend, "inspect output did not contain a container object")
    })?;

    Ok(limits_from_object(object))
}

fn limits_from_object(object: &Map<String, Value>) -> ResourceLimits {
    let host = object.get("HostConfig").and_then(Value::as_object);
    if host.is_none() {
        tracing::warn!("Inspect payload has no HostConfig; limits are unavailable");
    }
    let state = object.get("State").and_then(Value::as_object);
    let config = object.get("Config").and_then(Value::as_object);

    // `docker inspect` says NanoCpus, the Engine API schema says NanoCPUs
    let nano_key = if host.is_some_and(|h| h.contains_key("NanoCPUs") && !h.contains_key("NanoCpus")) {
        "NanoCPUs"
    } else {
        "NanoCpus"
    };

    ResourceLimits {
        name: str_field(Some(object), "Name")
            .trim_start_matches('/')
            .to_string(),
        id: str_field(Some(object), "Id").to_string(),
        image: str_field(config, "Image").to_string(),
        status: state
            .and_then(|s| s.get("Status"))
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        running: state
            .and_then(|s| s.get("Running"))
            .and_then(Value::as_bool)
            .unwrap_or(false),
        started_at: parse_started_at(state.and_then(|s| s.get("StartedAt"))),

        memory_limit_bytes: numeric_limit(host, "Memory"),
        memory_reservation_bytes: numeric_limit(host, "MemoryReservation"),
        memory_swap_bytes: numeric_limit(host, "MemorySwap"),
        cpu_nano_share: numeric_limit(host, nano_key),
        cpu_shares: numeric_limit(host, "CpuShares"),
        cpu_quota: numeric_limit(host, "CpuQuota"),
        cpu_period: numeric_limit(host, "CpuPeriod"),
        cpuset_cpus: string_limit(host, "CpusetCpus"),
        cpuset_mems: string_limit(host, "CpusetMems"),
        pids_limit: numeric_limit(host, "PidsLimit"),
        oom_kill_disable: bool_limit(host, "OomKillDisable"),
    }
}

fn str_field<'a>(object: Option<&'a Map<String, Value>>, key: &str) -> &'a str {
    object
        .and_then(|o| o.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// `null`, absent, zero and negative all mean "no limit"
fn numeric_limit(host: Option<&Map<String, Value>>, key: &str) -> Limit<u64> {
    let Some(host) = host else {
        return Limit::Unavailable;
    };
    match host.get(key) {
        None | Some(Value::Null) => Limit::Unset,
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                if v == 0 {
                    Limit::Unset
                } else {
                    Limit::Set(v)
                }
            } else if n.as_i64().is_some() {
                Limit::Unset
            } else {
                tracing::warn!(field = key, value = %n, "Non-integer limit value");
                Limit::Unavailable
            }
        }
        Some(other) => {
            tracing::warn!(field = key, value = %other, "Unexpected limit value type");
            Limit::Unavailable
        }
    }
}

fn string_limit(host: Option<&Map<String, Value>>, key: &str) -> Limit<String> {
    let Some(host) = host else {
        return Limit::Unavailable;
    };
    match host.get(key) {
        None | Some(Value::Null) => Limit::Unset,
        Some(Value::String(s)) if s.trim().is_empty() => Limit::Unset,
        Some(Value::String(s)) => Limit::Set(s.trim().to_string()),
        Some(other) => {
            tracing::warn!(field = key, value = %other, "Unexpected affinity value type");
            Limit::Unavailable
        }
    }
}

fn bool_limit(host: Option<&Map<String, Value>>, key: &str) -> Limit<bool> {
    let Some(host) = host else {
        return Limit::Unavailable;
    };
    match host.get(key) {
        None | Some(Value::Null) => Limit::Unset,
        Some(Value::Bool(b)) => Limit::Set(*b),
        Some(_) => Limit::Unavailable,
    }
}

/// The runtime reports never-started containers with the zero time
fn parse_started_at(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    let parsed = DateTime::parse_from_rfc3339(raw).ok()?.with_timezone(&Utc);
    (parsed.year() > 1).then_some(parsed)
}
