//! Unit normalization for runtime limit values
//!
//! Every formatter treats `None` and `0` as "no limit configured", the
//! same convention the container runtime itself uses. The bare functions
//! render English; the `_in` variants take a [`Locale`].

use crate::locale::{Label, Locale};
use crate::models::Limit;

const MB: u64 = 1024 * 1024;
const NANOS_PER_CPU: f64 = 1_000_000_000.0;
const SHARES_PER_CPU: f64 = 1024.0;

/// Format bytes as "512 MB" or "2 GB (2048 MB)"
pub fn format_bytes(value: Option<u64>) -> String {
    format_bytes_in(value, Locale::En)
}

pub fn format_bytes_in(value: Option<u64>, locale: Locale) -> String {
    let Some(bytes) = nonzero(value) else {
        return locale.unlimited().to_string();
    };

    let mb = bytes / MB;
    if mb >= 1024 {
        let gb = trim_decimals(format!("{:.2}", mb as f64 / 1024.0));
        format!("{} GB ({} MB)", gb, mb)
    } else {
        format!("{} MB", mb)
    }
}

/// Format nanocores as "1.50 CPU"
pub fn format_nano_share(value: Option<u64>) -> String {
    format_nano_share_in(value, Locale::En)
}

pub fn format_nano_share_in(value: Option<u64>, locale: Locale) -> String {
    match nonzero(value) {
        Some(nanos) => format!("{:.2} CPU", nanos as f64 / NANOS_PER_CPU),
        None => locale.unlimited().to_string(),
    }
}

/// Format a CFS quota/period pair as "0.50 CPU (50000/100000)"
pub fn format_quota_ratio(quota: Option<u64>, period: Option<u64>) -> String {
    format_quota_ratio_in(quota, period, Locale::En)
}

pub fn format_quota_ratio_in(quota: Option<u64>, period: Option<u64>, locale: Locale) -> String {
    match (nonzero(quota), nonzero(period)) {
        (Some(q), Some(p)) => format!("{:.2} CPU ({}/{})", q as f64 / p as f64, q, p),
        _ => locale.unlimited().to_string(),
    }
}

/// Format relative CPU shares as "512 (≈0.50 CPU, relative weight)"
pub fn format_shares(value: Option<u64>) -> String {
    format_shares_in(value, Locale::En)
}

pub fn format_shares_in(value: Option<u64>, locale: Locale) -> String {
    match nonzero(value) {
        Some(shares) => format!(
            "{} (≈{:.2} CPU, {})",
            shares,
            shares as f64 / SHARES_PER_CPU,
            locale.label(Label::RelativeWeight)
        ),
        None => locale.unlimited().to_string(),
    }
}

/// Format a cpuset/mems affinity list; empty means no pinning
pub fn format_cpuset(value: Option<&str>) -> String {
    format_cpuset_in(value, Locale::En)
}

pub fn format_cpuset_in(value: Option<&str>, locale: Locale) -> String {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(list) => list.to_string(),
        None => locale.all_available().to_string(),
    }
}

/// Format a process-count limit
pub fn format_pids(value: Option<u64>) -> String {
    format_pids_in(value, Locale::En)
}

pub fn format_pids_in(value: Option<u64>, locale: Locale) -> String {
    match nonzero(value) {
        Some(pids) => pids.to_string(),
        None => locale.unlimited().to_string(),
    }
}

/// Render a tri-state limit, using `f` for both set and unset values
pub fn render<T>(limit: &Limit<T>, locale: Locale, f: impl FnOnce(Option<&T>) -> String) -> String {
    match limit {
        Limit::Unavailable => locale.unavailable().to_string(),
        Limit::Unset => f(None),
        Limit::Set(v) => f(Some(v)),
    }
}

fn nonzero(value: Option<u64>) -> Option<u64> {
    value.filter(|v| *v != 0)
}

fn trim_decimals(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_unlimited() {
        assert_eq!(format_bytes(None), "unlimited");
        assert_eq!(format_bytes(Some(0)), "unlimited");
        assert_eq!(format_bytes_in(None, Locale::Ru), "без ограничений");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(Some(512 * MB)), "512 MB");
        // truncated, not rounded
        assert_eq!(format_bytes(Some(512 * MB + MB - 1)), "512 MB");
        assert_eq!(format_bytes(Some(1000)), "0 MB");
        assert_eq!(format_bytes(Some(1023 * MB)), "1023 MB");
    }

    #[test]
    fn test_format_bytes_gigabytes() {
        assert_eq!(format_bytes(Some(2_147_483_648)), "2 GB (2048 MB)");
        assert_eq!(format_bytes(Some(1024 * MB)), "1 GB (1024 MB)");
        assert_eq!(format_bytes(Some(1536 * MB)), "1.5 GB (1536 MB)");
        assert_eq!(format_bytes(Some(1100 * MB)), "1.07 GB (1100 MB)");
    }

    #[test]
    fn test_format_bytes_mb_figure_matches_truncation() {
        for v in [1u64, MB, 3 * MB + 7, 1024 * MB - 1, 5000 * MB + 12345, u64::MAX] {
            let mb = v / MB;
            let out = format_bytes(Some(v));
            assert!(out.contains(&format!("{} MB", mb)), "{out}");
            assert_eq!(out.contains("GB"), mb >= 1024, "{out}");
        }
    }

    #[test]
    fn test_format_nano_share() {
        assert_eq!(format_nano_share(Some(1_500_000_000)), "1.50 CPU");
        assert_eq!(format_nano_share(Some(250_000_000)), "0.25 CPU");
        assert_eq!(format_nano_share(Some(2_000_000_000)), "2.00 CPU");
        assert_eq!(format_nano_share(Some(0)), "unlimited");
        assert_eq!(format_nano_share(None), "unlimited");
    }

    #[test]
    fn test_format_quota_ratio() {
        assert_eq!(
            format_quota_ratio(Some(50_000), Some(100_000)),
            "0.50 CPU (50000/100000)"
        );
        assert_eq!(
            format_quota_ratio(Some(150_000), Some(100_000)),
            "1.50 CPU (150000/100000)"
        );
        assert_eq!(format_quota_ratio(Some(50_000), None), "unlimited");
        assert_eq!(format_quota_ratio(None, Some(100_000)), "unlimited");
        assert_eq!(format_quota_ratio(Some(50_000), Some(0)), "unlimited");
        assert_eq!(format_quota_ratio(Some(0), Some(100_000)), "unlimited");
    }

    #[test]
    fn test_format_shares_is_relative() {
        assert_eq!(
            format_shares(Some(512)),
            "512 (≈0.50 CPU, relative weight)"
        );
        assert_eq!(format_shares(Some(0)), "unlimited");
        assert!(format_shares_in(Some(1024), Locale::Ru).contains("относительный вес"));
    }

    #[test]
    fn test_format_cpuset() {
        assert_eq!(format_cpuset(Some("0-3,6")), "0-3,6");
        assert_eq!(format_cpuset(Some("")), "all available");
        assert_eq!(format_cpuset(None), "all available");
        assert_eq!(format_cpuset_in(None, Locale::Ru), "все доступные");
    }

    #[test]
    fn test_format_pids() {
        assert_eq!(format_pids(Some(100)), "100");
        assert_eq!(format_pids(None), "unlimited");
    }

    #[test]
    fn test_render_unavailable_is_not_unlimited() {
        let limit: Limit<u64> = Limit::Unavailable;
        let out = render(&limit, Locale::En, |v| format_bytes(v.copied()));
        assert_eq!(out, "unavailable");

        let limit = Limit::Set(2_147_483_648u64);
        let out = render(&limit, Locale::En, |v| format_bytes(v.copied()));
        assert_eq!(out, "2 GB (2048 MB)");
    }
}
