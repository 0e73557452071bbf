//! Application configuration from CLI flags and an optional config file.

use std::path::PathBuf;

use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://rewards.example.com";
const DEFAULT_FORGOT_PASSWORD_URL: &str = "https://rewards.example.com/reset-password";
const DEFAULT_WEBSITE_URL: &str = "https://rewards.example.com";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Optional file-based overrides, read from `config.toml` in the platform
/// config directory.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    forgot_password_url: Option<String>,
    website_url: Option<String>,
    mouse: Option<bool>,
    touch: Option<bool>,
    log_level: Option<LogLevel>,
}

/// Application configuration resolved from CLI flags over file overrides.
#[derive(Debug, Parser)]
#[command(name = "punchcard", version, about = "Loyalty rewards club for the terminal")]
pub struct AppConfig {
    /// Rewards backend base URL.
    #[arg(long, env = "PUNCHCARD_BASE_URL")]
    pub base_url: Option<String>,

    /// Log file path. Defaults to the platform data directory.
    #[arg(long)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Disable mouse support.
    #[arg(long)]
    pub no_mouse: bool,

    /// Treat the terminal as touch-capable (gesture vocabulary stays in
    /// touch terms instead of being remapped to mouse equivalents).
    #[arg(long)]
    pub touch: bool,

    #[arg(skip)]
    file: FileConfig,
}

impl AppConfig {
    /// Parses CLI arguments and merges the optional config file.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::parse();
        config.file = Self::read_file_config();

        if config.base_url.is_none() {
            config.base_url = config.file.base_url.clone();
        }
        if let Some(level) = config.file.log_level
            && config.log_level == LogLevel::default()
        {
            config.log_level = level;
        }

        config
    }

    fn read_file_config() -> FileConfig {
        let Some(proj_dirs) = ProjectDirs::from("app", "punchcard", "punchcard") else {
            return FileConfig::default();
        };

        let path = proj_dirs.config_dir().join("config.toml");
        if !path.exists() {
            return FileConfig::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(file) => file,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Ignoring unreadable config file");
                    FileConfig::default()
                }
            },
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to read config file");
                FileConfig::default()
            }
        }
    }

    /// Returns the effective backend base URL.
    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the forgot-password URL opened in the system browser.
    #[must_use]
    pub fn forgot_password_url(&self) -> &str {
        self.file
            .forgot_password_url
            .as_deref()
            .unwrap_or(DEFAULT_FORGOT_PASSWORD_URL)
    }

    /// Returns the public website URL.
    #[must_use]
    pub fn website_url(&self) -> &str {
        self.file.website_url.as_deref().unwrap_or(DEFAULT_WEBSITE_URL)
    }

    /// Returns whether mouse capture should be enabled.
    #[must_use]
    pub fn mouse(&self) -> bool {
        !self.no_mouse && self.file.mouse.unwrap_or(true)
    }

    /// Returns whether the terminal should be treated as touch-capable.
    #[must_use]
    pub fn touch_support(&self) -> bool {
        self.touch || self.file.touch.unwrap_or(false)
    }

    /// Returns the log file path, defaulting to the platform data directory.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_path {
            return Some(path.clone());
        }

        ProjectDirs::from("app", "punchcard", "punchcard")
            .map(|dirs| dirs.data_dir().join("punchcard.log"))
    }
}
