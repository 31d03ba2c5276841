//! Configuration management for the CLI
//!
//! Sources, lowest precedence first: built-in defaults, the optional
//! `~/.config/resreport/config.json`, `RESREPORT_*` environment variables,
//! then command-line flags.

use crate::output::OutputFormat;
use crate::Cli;
use anyhow::{bail, Context, Result};
use reporter_lib::{Locale, RuntimeConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Effective CLI settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Engine host; HTTP/TCP URLs select the REST backend
    #[serde(default)]
    pub host: Option<String>,

    /// Runtime CLI binary
    #[serde(default = "default_runtime_bin")]
    pub runtime_bin: String,

    /// Timeout for each runtime query in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub locale: Locale,

    #[serde(default = "default_color")]
    pub color: bool,

    #[serde(default)]
    pub format: OutputFormat,
}

fn default_runtime_bin() -> String {
    "docker".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_color() -> bool {
    true
}

impl Settings {
    /// Load settings from the default config file and environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok();
        Self::load_from(path.as_deref())
    }

    /// Load settings from `path` (if it exists) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            tracing::debug!(path = %path.display(), "Reading config file");
            builder = builder.add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Json)
                    .required(false),
            );
        }

        let config = builder
            .add_source(config::Environment::with_prefix("RESREPORT").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Apply command-line flags on top of file and environment values
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.host = Some(host.clone());
        }
        if let Some(bin) = &cli.runtime_bin {
            self.runtime_bin = bin.clone();
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.no_color {
            self.color = false;
        }
    }

    /// Runtime connection settings
    pub fn runtime_config(&self) -> Result<RuntimeConfig> {
        if self.timeout_secs == 0 {
            bail!("invalid argument --timeout: must be at least 1 second");
        }
        if self.runtime_bin.trim().is_empty() {
            bail!("invalid argument --runtime-bin: must not be empty");
        }

        Ok(RuntimeConfig {
            host: self.host.clone().filter(|h| !h.trim().is_empty()),
            runtime_bin: self.runtime_bin.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("resreport").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from(None).unwrap();
        assert_eq!(settings.runtime_bin, "docker");
        assert_eq!(settings.timeout_secs, 10);
        assert!(settings.color);
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(Some(&temp_dir.path().join("absent.json"))).unwrap();
        assert_eq!(settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"runtime_bin": "podman", "timeout_secs": 3, "locale": "ru", "color": false, "format": "json"}"#,
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.runtime_bin, "podman");
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.locale, Locale::Ru);
        assert!(!settings.color);
        assert_eq!(settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_cli_flags_override() {
        let mut settings = Settings::load_from(None).unwrap();
        let cli = Cli::parse_from([
            "resreport",
            "--host",
            "tcp://10.0.0.5:2375",
            "--timeout",
            "2",
            "--locale",
            "ru",
            "--no-color",
            "web",
        ]);
        settings.merge_cli(&cli);

        let runtime = settings.runtime_config().unwrap();
        assert_eq!(runtime.host.as_deref(), Some("tcp://10.0.0.5:2375"));
        assert_eq!(runtime.timeout, Duration::from_secs(2));
        assert_eq!(settings.locale, Locale::Ru);
        assert!(!settings.color);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut settings = Settings::load_from(None).unwrap();
        settings.timeout_secs = 0;
        let err = settings.runtime_config().unwrap_err();
        assert!(err.to_string().contains("--timeout"));
    }
}
