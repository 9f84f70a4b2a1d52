use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::PathBuf, time::Duration};

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_BASE_URL: &str = "OPENWEATHER_BASE_URL";
pub const ENV_MODE: &str = "NODE_ENV";
pub const ENV_PORT: &str = "PORT";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_UPSTREAM_TIMEOUT: &str = "UPSTREAM_TIMEOUT_SECS";

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Execution mode. Development enables request logging, GraphiQL and
/// schema introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl RunMode {
    /// Unset or `development` means development; anything else is production.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("development") => RunMode::Development,
            Some(_) => RunMode::Production,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(std::env::var(ENV_MODE).ok().as_deref())
    }

    pub fn is_development(&self) -> bool {
        matches!(self, RunMode::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Development => "development",
            RunMode::Production => "production",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Optional settings persisted on disk by `weather-gateway configure`.
///
/// Example TOML:
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// port = 4000
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<PathBuf>,
    pub upstream_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-gateway", "weather-gateway")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Process-wide settings, resolved once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub base_url: Url,
    pub mode: RunMode,
    pub port: u16,
    pub static_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl Config {
    /// Resolve from the config file and the process environment.
    pub fn load() -> Result<Self> {
        let file = FileConfig::load()?;
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    /// Environment values (via `lookup`) win over file values, which win
    /// over built-in defaults.
    pub fn resolve<F>(file: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(ENV_API_KEY)
            .or(file.api_key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: set {ENV_API_KEY} or run `weather-gateway configure`."
                )
            })?;

        let raw_url = non_empty(ENV_BASE_URL)
            .or(file.base_url)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather base URL configured.\n\
                     Hint: set {ENV_BASE_URL} or run `weather-gateway configure`."
                )
            })?;
        let base_url = Url::parse(raw_url.trim())
            .with_context(|| format!("Invalid {ENV_BASE_URL}: {raw_url}"))?;

        let port = match non_empty(ENV_PORT) {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid {ENV_PORT}: {v}"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let static_dir = non_empty(ENV_STATIC_DIR)
            .map(PathBuf::from)
            .or(file.static_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let timeout_secs = match non_empty(ENV_UPSTREAM_TIMEOUT) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {ENV_UPSTREAM_TIMEOUT}: {v}"))?,
            None => file
                .upstream_timeout_secs
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key: ApiKey::new(api_key),
            base_url,
            mode: RunMode::parse(lookup(ENV_MODE).as_deref()),
            port,
            static_dir,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
