//! Localized labels for reports
//!
//! Data gathering never depends on the locale; only rendering does.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (default)
    #[default]
    En,
    /// Russian
    Ru,
}

/// Every piece of fixed text a report can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Container,
    Id,
    Image,
    Status,
    Running,
    StartedAt,
    Backend,
    MemorySection,
    MemoryLimit,
    MemoryReservation,
    MemorySwap,
    CpuSection,
    NanoCpus,
    CpuQuota,
    CpuShares,
    CpusetCpus,
    CpusetMems,
    OtherSection,
    PidsLimit,
    OomKiller,
    Name,
    Yes,
    No,
    Enabled,
    Disabled,
    Never,
    NoContainers,
    RelativeWeight,
    ListHint,
}

impl Locale {
    /// Marker for a limit that is not configured
    pub fn unlimited(self) -> &'static str {
        match self {
            Self::En => "unlimited",
            Self::Ru => "без ограничений",
        }
    }

    /// Marker for a value the runtime could not provide
    pub fn unavailable(self) -> &'static str {
        match self {
            Self::En => "unavailable",
            Self::Ru => "недоступно",
        }
    }

    /// Marker for an affinity list with no pinning
    pub fn all_available(self) -> &'static str {
        match self {
            Self::En => "all available",
            Self::Ru => "все доступные",
        }
    }

    pub fn label(self, label: Label) -> &'static str {
        match self {
            Self::En => english(label),
            Self::Ru => russian(label),
        }
    }
}

fn english(label: Label) -> &'static str {
    match label {
        Label::Container => "Container",
        Label::Id => "ID",
        Label::Image => "Image",
        Label::Status => "Status",
        Label::Running => "Running",
        Label::StartedAt => "Started",
        Label::Backend => "Backend",
        Label::MemorySection => "Memory",
        Label::MemoryLimit => "Limit",
        Label::MemoryReservation => "Reservation",
        Label::MemorySwap => "Memory + swap",
        Label::CpuSection => "CPU",
        Label::NanoCpus => "CPUs (absolute)",
        Label::CpuQuota => "Quota / period",
        Label::CpuShares => "Shares",
        Label::CpusetCpus => "Cpuset CPUs",
        Label::CpusetMems => "Cpuset mems",
        Label::OtherSection => "Other",
        Label::PidsLimit => "PIDs limit",
        Label::OomKiller => "OOM killer",
        Label::Name => "NAME",
        Label::Yes => "yes",
        Label::No => "no",
        Label::Enabled => "enabled",
        Label::Disabled => "disabled",
        Label::Never => "never",
        Label::NoContainers => "No containers found",
        Label::RelativeWeight => "relative weight",
        Label::ListHint => "Pass a container name to see its resource limits",
    }
}

fn russian(label: Label) -> &'static str {
    match label {
        Label::Container => "Контейнер",
        Label::Id => "ID",
        Label::Image => "Образ",
        Label::Status => "Статус",
        Label::Running => "Запущен",
        Label::StartedAt => "Время запуска",
        Label::Backend => "Источник",
        Label::MemorySection => "Память",
        Label::MemoryLimit => "Лимит",
        Label::MemoryReservation => "Резерв",
        Label::MemorySwap => "Память + swap",
        Label::CpuSection => "Процессор",
        Label::NanoCpus => "CPU (абсолютно)",
        Label::CpuQuota => "Квота / период",
        Label::CpuShares => "Доли CPU",
        Label::CpusetCpus => "Ядра CPU",
        Label::CpusetMems => "Узлы памяти",
        Label::OtherSection => "Прочее",
        Label::PidsLimit => "Лимит процессов",
        Label::OomKiller => "OOM killer",
        Label::Name => "ИМЯ",
        Label::Yes => "да",
        Label::No => "нет",
        Label::Enabled => "включён",
        Label::Disabled => "отключён",
        Label::Never => "никогда",
        Label::NoContainers => "Контейнеры не найдены",
        Label::RelativeWeight => "относительный вес",
        Label::ListHint => "Укажите имя контейнера, чтобы увидеть его лимиты ресурсов",
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ru" | "russian" => Ok(Self::Ru),
            other => Err(format!("unknown locale '{other}' (expected en or ru)")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::Ru => f.write_str("ru"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" RU ".parse::<Locale>().unwrap(), Locale::Ru);
        let err = "de".parse::<Locale>().unwrap_err();
        assert!(err.contains("'de'"));
    }

    #[test]
    fn test_markers() {
        assert_eq!(Locale::En.unlimited(), "unlimited");
        assert_eq!(Locale::Ru.unlimited(), "без ограничений");
        assert_eq!(Locale::Ru.all_available(), "все доступные");
        assert_ne!(Locale::En.unavailable(), Locale::En.unlimited());
    }
}
