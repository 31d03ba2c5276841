//! Rendering of resource reports and container listings

use crate::format::{
    format_bytes_in, format_cpuset_in, format_nano_share_in, format_pids_in,
    format_quota_ratio_in, format_shares_in, render,
};
use crate::locale::{Label, Locale};
use crate::models::{ContainerSummary, Limit, ResourceLimits};
use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{builder::Builder, settings::Style};

const LABEL_WIDTH: usize = 18;

/// Human-readable strings for every limit field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLimits {
    pub memory_limit: String,
    pub memory_reservation: String,
    pub memory_swap: String,
    pub cpu_nano: String,
    pub cpu_quota: String,
    pub cpu_shares: String,
    pub cpuset_cpus: String,
    pub cpuset_mems: String,
    pub pids_limit: String,
    pub oom_killer: String,
}

impl RenderedLimits {
    pub fn new(limits: &ResourceLimits, locale: Locale) -> Self {
        let bytes = |limit: &Limit<u64>| render(limit, locale, |v| format_bytes_in(v.copied(), locale));

        Self {
            memory_limit: bytes(&limits.memory_limit_bytes),
            memory_reservation: bytes(&limits.memory_reservation_bytes),
            memory_swap: bytes(&limits.memory_swap_bytes),
            cpu_nano: render(&limits.cpu_nano_share, locale, |v| {
                format_nano_share_in(v.copied(), locale)
            }),
            cpu_quota: render_quota(limits, locale),
            cpu_shares: render(&limits.cpu_shares, locale, |v| {
                format_shares_in(v.copied(), locale)
            }),
            cpuset_cpus: render(&limits.cpuset_cpus, locale, |v| {
                format_cpuset_in(v.map(String::as_str), locale)
            }),
            cpuset_mems: render(&limits.cpuset_mems, locale, |v| {
                format_cpuset_in(v.map(String::as_str), locale)
            }),
            pids_limit: render(&limits.pids_limit, locale, |v| {
                format_pids_in(v.copied(), locale)
            }),
            oom_killer: render(&limits.oom_kill_disable, locale, |v| {
                let label = if v.copied().unwrap_or(false) {
                    Label::Disabled
                } else {
                    Label::Enabled
                };
                locale.label(label).to_string()
            }),
        }
    }
}

/// Quota and period are only meaningful together
fn render_quota(limits: &ResourceLimits, locale: Locale) -> String {
    if limits.cpu_quota.is_unavailable() || limits.cpu_period.is_unavailable() {
        return locale.unavailable().to_string();
    }
    format_quota_ratio_in(
        limits.cpu_quota.value().copied(),
        limits.cpu_period.value().copied(),
        locale,
    )
}

/// A complete report for one container
#[derive(Debug, Clone, Serialize)]
pub struct ResourceReport {
    pub container: ResourceLimits,
    pub rendered: RenderedLimits,
    pub backend: String,
    pub locale: Locale,
}

impl ResourceReport {
    pub fn new(container: ResourceLimits, backend: impl Into<String>, locale: Locale) -> Self {
        let rendered = RenderedLimits::new(&container, locale);
        Self {
            container,
            rendered,
            backend: backend.into(),
            locale,
        }
    }

    /// Render the sectioned text report
    pub fn render_text(&self) -> String {
        let locale = self.locale;
        let c = &self.container;
        let r = &self.rendered;
        let mut out = String::new();

        let title = format!("{}: {}", locale.label(Label::Container), c.name);
        let _ = writeln!(out, "{}", title.bold());
        let _ = writeln!(out, "{}", "=".repeat(60));
        line(&mut out, locale.label(Label::Id), c.short_id());
        line(&mut out, locale.label(Label::Image), &c.image);
        line(&mut out, locale.label(Label::Status), &color_status(&c.status));
        let running = if c.running { Label::Yes } else { Label::No };
        line(&mut out, locale.label(Label::Running), locale.label(running));
        let started = c.started_at.map_or_else(
            || locale.label(Label::Never).to_string(),
            |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        line(&mut out, locale.label(Label::StartedAt), &started);

        section(&mut out, locale.label(Label::MemorySection));
        line(&mut out, locale.label(Label::MemoryLimit), &r.memory_limit);
        line(&mut out, locale.label(Label::MemoryReservation), &r.memory_reservation);
        line(&mut out, locale.label(Label::MemorySwap), &r.memory_swap);

        section(&mut out, locale.label(Label::CpuSection));
        line(&mut out, locale.label(Label::NanoCpus), &r.cpu_nano);
        line(&mut out, locale.label(Label::CpuQuota), &r.cpu_quota);
        line(&mut out, locale.label(Label::CpuShares), &r.cpu_shares);
        line(&mut out, locale.label(Label::CpusetCpus), &r.cpuset_cpus);
        line(&mut out, locale.label(Label::CpusetMems), &r.cpuset_mems);

        section(&mut out, locale.label(Label::OtherSection));
        line(&mut out, locale.label(Label::PidsLimit), &r.pids_limit);
        line(&mut out, locale.label(Label::OomKiller), &r.oom_killer);

        let _ = writeln!(out);
        let footer = format!("{}: {}", locale.label(Label::Backend), self.backend);
        let _ = writeln!(out, "{}", footer.dimmed());
        out
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title.bold());
    let _ = writeln!(out, "{}", "-".repeat(60));
}

fn line(out: &mut String, label: &str, value: &str) {
    // pad by chars, not bytes, so Cyrillic labels align
    let pad = LABEL_WIDTH.saturating_sub(label.chars().count());
    let _ = writeln!(out, "{}:{} {}", label, " ".repeat(pad), value);
}

/// Color a runtime status by lifecycle state
pub fn color_status(status: &str) -> String {
    color_by_state(status, status)
}

/// Color `text` by the short lifecycle `state` it belongs to
pub fn color_by_state(state: &str, text: &str) -> String {
    match state.to_lowercase().as_str() {
        "running" => text.green().to_string(),
        "paused" | "restarting" | "created" => text.yellow().to_string(),
        "exited" | "dead" | "removing" => text.red().to_string(),
        _ => text.to_string(),
    }
}

/// Render the NAME / STATUS / IMAGE listing table
///
/// An empty listing still renders the header row.
pub fn render_container_table(containers: &[ContainerSummary], locale: Locale) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        locale.label(Label::Name).to_string(),
        locale.label(Label::Status).to_uppercase(),
        locale.label(Label::Image).to_uppercase(),
    ]);
    for c in containers {
        builder.push_record([
            c.name.clone(),
            color_by_state(&c.state, &c.status),
            c.image.clone(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// colored's override is process-global
    static COLOR_OVERRIDE: Mutex<()> = Mutex::new(());

    fn scenario_limits() -> ResourceLimits {
        let mut limits = ResourceLimits::unlimited("backend-1");
        limits.status = "running".to_string();
        limits.running = true;
        limits.memory_limit_bytes = Limit::Set(2_147_483_648);
        limits.cpu_nano_share = Limit::Set(1_500_000_000);
        limits.cpu_quota = Limit::Set(50_000);
        limits.cpu_period = Limit::Set(100_000);
        limits
    }

    #[test]
    fn test_rendered_scenario() {
        let r = RenderedLimits::new(&scenario_limits(), Locale::En);
        assert_eq!(r.memory_limit, "2 GB (2048 MB)");
        assert_eq!(r.cpu_nano, "1.50 CPU");
        assert_eq!(r.cpu_quota, "0.50 CPU (50000/100000)");
        assert_eq!(r.memory_swap, "unlimited");
        assert_eq!(r.cpuset_cpus, "all available");
        assert_eq!(r.oom_killer, "enabled");
    }

    #[test]
    fn test_everything_unlimited_in_russian() {
        let r = RenderedLimits::new(&ResourceLimits::unlimited("x"), Locale::Ru);
        for value in [
            &r.memory_limit,
            &r.memory_reservation,
            &r.memory_swap,
            &r.cpu_nano,
            &r.cpu_quota,
            &r.cpu_shares,
            &r.pids_limit,
        ] {
            assert_eq!(value, "без ограничений");
        }
        assert_eq!(r.cpuset_cpus, "все доступные");
        assert_eq!(r.cpuset_mems, "все доступные");
    }

    #[test]
    fn test_unavailable_quota_is_not_unlimited() {
        let mut limits = scenario_limits();
        limits.cpu_period = Limit::Unavailable;
        let r = RenderedLimits::new(&limits, Locale::En);
        assert_eq!(r.cpu_quota, "unavailable");
        assert_eq!(r.cpu_nano, "1.50 CPU");
    }

    #[test]
    fn test_render_text_sections() {
        let _guard = COLOR_OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
        colored::control::set_override(false);
        let text = ResourceReport::new(scenario_limits(), "docker-cli", Locale::En).render_text();

        assert!(text.contains("Container: backend-1"));
        assert!(text.contains("Memory\n"));
        assert!(text.contains("CPU\n"));
        assert!(text.contains("Limit:              2 GB (2048 MB)"));
        assert!(text.contains("CPUs (absolute):    1.50 CPU"));
        assert!(text.contains("Quota / period:     0.50 CPU (50000/100000)"));
        assert!(text.contains("Started:            never"));
        assert!(text.contains("Backend: docker-cli"));
    }

    #[test]
    fn test_report_json_has_raw_and_rendered() {
        let report = ResourceReport::new(scenario_limits(), "engine-api", Locale::En);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["container"]["memory_limit_bytes"]["value"], 2_147_483_648u64);
        assert_eq!(json["rendered"]["cpu_nano"], "1.50 CPU");
        assert_eq!(json["locale"], "en");
    }

    #[test]
    fn test_container_table() {
        let rows = vec![ContainerSummary {
            name: "nginx".to_string(),
            status: "Up 3 minutes".to_string(),
            image: "nginx:alpine".to_string(),
            state: "running".to_string(),
        }];
        let table = render_container_table(&rows, Locale::En);
        assert!(table.contains("NAME"));
        assert!(table.contains("STATUS"));
        assert!(table.contains("IMAGE"));
        assert!(table.contains("nginx:alpine"));

        let empty = render_container_table(&[], Locale::En);
        assert!(empty.contains("NAME"));
        assert!(!empty.contains("nginx"));
    }

    #[test]
    fn test_status_cell_colored_by_state() {
        let _guard = COLOR_OVERRIDE.lock().unwrap_or_else(|e| e.into_inner());
        colored::control::set_override(true);
        let rows = vec![ContainerSummary {
            name: "worker".to_string(),
            status: "Exited (1) 2 hours ago".to_string(),
            image: "todo-backend".to_string(),
            state: "exited".to_string(),
        }];
        let table = render_container_table(&rows, Locale::En);
        let red = "Exited (1) 2 hours ago".red().to_string();
        let distinct = color_by_state("running", "Up") != color_by_state("exited", "Up");
        colored::control::unset_override();

        assert!(table.contains(&red), "{table}");
        assert!(distinct);
    }
}
