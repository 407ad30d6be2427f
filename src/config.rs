//! User configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "tick-reminder";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_tasks_file")]
    pub tasks_file: PathBuf,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub notification: NotificationConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks_file: default_tasks_file(),
            monitor: MonitorConfig::default(),
            notification: NotificationConfig::default(),
            log: LogConfig::default(),
        }
    }
}

fn default_tasks_file() -> PathBuf {
    PathBuf::from("tasks.txt")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_error_backoff")]
    pub error_backoff_secs: u64,

    /// Do not re-admit tasks that already fired when the file is reloaded
    #[serde(default)]
    pub suppress_refired: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            error_backoff_secs: default_error_backoff(),
            suppress_refired: false,
        }
    }
}

fn default_poll_interval() -> u64 {
    1
}

fn default_error_backoff() -> u64 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub bell: bool,

    #[serde(default = "default_banner_width")]
    pub banner_width: usize,

    /// Optional .wav/.ogg file played with each reminder
    #[serde(default)]
    pub sound: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            bell: true,
            banner_width: default_banner_width(),
            sound: String::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_banner_width() -> usize {
    50
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, e.g. "info" or "tick_reminder=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path; empty disables file logging
    #[serde(default = "default_log_file")]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "task_manager.log".to_string()
}

/// Platform config directory for the app (e.g. ~/.config/tick-reminder)
pub fn get_app_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    get_app_dir().map(|d| d.join("config.toml"))
}

/// Load the config from `path`, or from the default location when `None`.
///
/// A missing file yields the defaults; a malformed one is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return Ok(Config::default()),
    };
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
