use std::time::Duration;
use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::validation::validate_host;

pub const DEFAULT_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    ReadFailed(std::io::Error),
    #[error("failed to write configuration file: {0}")]
    WriteFailed(std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    ParseFailed(toml::de::Error),
    #[error("failed to serialize configuration: {0}")]
    SerializeFailed(toml::ser::Error),
    #[error("no configuration directory available")]
    ConfigPathUnavailable,
    #[error("missing or empty hosts configuration")]
    NoHosts,
    #[error("invalid host {host:?}: {reason}")]
    InvalidHost { host: String, reason: String },
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
}

/// Raw on-disk configuration, as written by the operator
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub monitor: MonitorSettings,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    pub hosts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<u32>,
}

/// Validated configuration snapshot, immutable for the life of the process
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub hosts: Vec<String>,
    pub interval: Duration,
    pub timeout: Duration,
    pub failure_command: Option<String>,
    pub failure_threshold: u32,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/vakt/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, ConfigError> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(ConfigError::ConfigPathUnavailable);
    };

    Ok(path.join("vakt/config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self { monitor: MonitorSettings::default() }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Current Internal Configuration State:")?;
        write_title_1(f, "Monitor")?;
        write_1(f, "Hosts", &self.monitor.hosts.join(", "))?;
        write_1(f, "Interval (ms)", &display_opt(&self.monitor.interval_ms))?;
        write_1(f, "Timeout (ms)", &display_opt(&self.monitor.timeout_ms))?;
        write_1(f, "Failure Command", &display_opt(&self.monitor.failure_command))?;
        write_1(f, "Failure Threshold", &display_opt(&self.monitor.failure_threshold))?;

        Ok(())
    }
}

fn display_opt<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(default)".to_string(),
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/vakt/config.toml
    ///  or the specified path, with the name config.toml if one does not exist
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string =
                fs::read_to_string(&config_path).map_err(ConfigError::ReadFailed)?;
            toml::from_str(raw_string.as_str()).map_err(ConfigError::ParseFailed)
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &path::Path) -> Result<(), ConfigError> {
        let config_str: String =
            toml::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;
        }

        fs::write(path, config_str).map_err(ConfigError::WriteFailed)
    }

    /// Validate the raw settings into an immutable snapshot
    ///
    /// A missing or empty host list is fatal. Missing interval/timeout
    /// fall back to their defaults with a warning; explicit zeroes are
    /// rejected rather than silently replaced.
    pub fn validate(self) -> Result<MonitorConfig, ConfigError> {
        let settings = self.monitor;

        if settings.hosts.is_empty() {
            return Err(ConfigError::NoHosts);
        }

        for host in &settings.hosts {
            let checked = validate_host(host);
            if !checked.is_valid {
                return Err(ConfigError::InvalidHost {
                    host: host.clone(),
                    reason: checked.error.unwrap_or_else(|| "invalid host".to_string()),
                });
            }
        }

        let interval_ms = match settings.interval_ms {
            Some(0) => return Err(ConfigError::NotPositive("interval_ms")),
            Some(ms) => ms,
            None => {
                warn!("interval_ms is missing, using default 60s (60000ms)");
                DEFAULT_INTERVAL_MS
            }
        };

        let timeout_ms = match settings.timeout_ms {
            Some(0) => return Err(ConfigError::NotPositive("timeout_ms")),
            Some(ms) => ms,
            None => {
                warn!("timeout_ms is missing, using default 5s (5000ms)");
                DEFAULT_TIMEOUT_MS
            }
        };

        let failure_threshold = match settings.failure_threshold {
            Some(0) => return Err(ConfigError::NotPositive("failure_threshold")),
            Some(n) => n,
            None => DEFAULT_FAILURE_THRESHOLD,
        };

        Ok(MonitorConfig {
            hosts: settings.hosts,
            interval: Duration::from_millis(interval_ms),
            timeout: Duration::from_millis(timeout_ms),
            failure_command: settings.failure_command,
            failure_threshold,
        })
    }
}
