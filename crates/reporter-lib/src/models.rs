//! Core data models for the resource reporter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured limit as read from the container runtime.
///
/// The runtime reports "no limit" as `null`, an absent key, `0`, or `-1`.
/// All of those become [`Limit::Unset`] at the parsing boundary, so the
/// rest of the crate never sees the raw sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Limit<T> {
    /// No limit configured; the host default applies.
    Unset,
    /// An explicit limit.
    Set(T),
    /// The runtime returned something that could not be read.
    Unavailable,
}

impl<T> Default for Limit<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Limit<T> {
    /// The configured value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(v) => Some(v),
            Self::Unset | Self::Unavailable => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}

/// Snapshot of one container's configured resource constraints.
///
/// Built fresh per invocation from a single inspect call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    pub name: String,
    pub id: String,
    pub image: String,
    pub status: String,
    pub running: bool,
    pub started_at: Option<DateTime<Utc>>,

    /// Hard memory limit in bytes
    pub memory_limit_bytes: Limit<u64>,
    /// Soft memory limit in bytes
    pub memory_reservation_bytes: Limit<u64>,
    /// Memory plus swap ceiling in bytes
    pub memory_swap_bytes: Limit<u64>,

    /// Absolute CPU allocation in nanocores (1e9 = one core)
    pub cpu_nano_share: Limit<u64>,
    /// Relative CPU weight (1024 = one nominal core)
    pub cpu_shares: Limit<u64>,
    /// CFS quota in microseconds per period
    pub cpu_quota: Limit<u64>,
    /// CFS period in microseconds
    pub cpu_period: Limit<u64>,
    pub cpuset_cpus: Limit<String>,
    pub cpuset_mems: Limit<String>,

    pub pids_limit: Limit<u64>,
    pub oom_kill_disable: Limit<bool>,
}

impl ResourceLimits {
    /// An empty snapshot for `name` with every limit unset.
    pub fn unlimited(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: String::new(),
            image: String::new(),
            status: "unknown".to_string(),
            running: false,
            started_at: None,
            memory_limit_bytes: Limit::Unset,
            memory_reservation_bytes: Limit::Unset,
            memory_swap_bytes: Limit::Unset,
            cpu_nano_share: Limit::Unset,
            cpu_shares: Limit::Unset,
            cpu_quota: Limit::Unset,
            cpu_period: Limit::Unset,
            cpuset_cpus: Limit::Unset,
            cpuset_mems: Limit::Unset,
            pids_limit: Limit::Unset,
            oom_kill_disable: Limit::Unset,
        }
    }

    /// Container id shortened the way `docker ps` shows it.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(12)
            .map_or(self.id.len(), |(i, _)| i);
        &self.id[..end]
    }
}

/// One row of the container listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSummary {
    pub name: String,
    /// Human status, e.g. "Up 2 hours" or "Exited (0) 3 days ago"
    pub status: String,
    pub image: String,
    /// Short lifecycle state, e.g. "running" or "exited"
    pub state: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_accessors() {
        let set: Limit<u64> = Limit::Set(5);
        assert_eq!(set.value(), Some(&5));
        assert!(set.is_set());
        assert_eq!(Limit::<u64>::Unset.value(), None);
        assert!(Limit::<u64>::Unavailable.is_unavailable());
        assert_eq!(Limit::<String>::default(), Limit::Unset);
    }

    #[test]
    fn test_limit_serializes_tagged() {
        let json = serde_json::to_value(Limit::Set(1024u64)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "set", "value": 1024}));

        let json = serde_json::to_value(Limit::<u64>::Unavailable).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unavailable"}));
    }

    #[test]
    fn test_short_id() {
        let mut limits = ResourceLimits::unlimited("web");
        limits.id = "4f1c2e9a8b7d6c5e4f3a2b1c0d9e8f7a".to_string();
        assert_eq!(limits.short_id(), "4f1c2e9a8b7d");

        limits.id = "abc".to_string();
        assert_eq!(limits.short_id(), "abc");
    }
}
