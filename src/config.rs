//! Configuration management for DataCamp Fetcher
//!
//! Settings come from an optional TOML file layered over built-in defaults.
//! Every section and field may be omitted.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::app::{ApiConfig, ClientConfig, DownloadFlags, OrchestratorConfig};
use crate::constants::{config as paths, http, logging, ui};
use crate::errors::{ConfigError, ConfigResult};

/// Unified application configuration for TOML serialization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings
    pub client: ClientConfigToml,
    /// Service base URLs
    pub api: ApiConfig,
    /// Terminal output settings
    pub ui: UiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// TOML-friendly client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfigToml {
    /// Request timeout, e.g. `"2m"`
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Connect timeout, e.g. `"30s"`
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfigToml {
    fn default() -> Self {
        Self {
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
            user_agent: http::USER_AGENT.to_string(),
        }
    }
}

/// Terminal output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw interval of the waiting indicator, e.g. `"400ms"`
    #[serde(with = "humantime_serde")]
    pub spinner_interval: Duration,
    /// Draw the waiting indicator when stderr is a terminal
    pub spinner: bool,
    /// Enable colored status lines
    pub colored_output: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            spinner_interval: ui::SPINNER_INTERVAL,
            spinner: true,
            colored_output: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level used when no verbosity flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: logging::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl AppConfig {
    /// Load configuration from the first available source:
    /// 1. `config_file_override` (must exist)
    /// 2. `./datacamp-fetcher.toml`
    /// 3. `<user config dir>/datacamp-fetcher/config.toml`
    /// 4. Built-in defaults
    pub async fn load(config_file_override: Option<PathBuf>) -> ConfigResult<Self> {
        let config = match config_file_override {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound { path }),
            Some(path) => Self::load_from_file(&path).await?,
            None => match Self::find_config_file() {
                Some(path) => Self::load_from_file(&path).await?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let mut search_paths = vec![PathBuf::from(".").join(paths::LOCAL_CONFIG_FILE)];
        if let Some(path) = Self::default_config_path() {
            search_paths.push(path);
        }

        search_paths.into_iter().find(|path| {
            let found = path.exists();
            if found {
                debug!("Found config file: {}", path.display());
            }
            found
        })
    }

    /// The per-user config file path, if a config directory exists
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(paths::CONFIG_DIR_NAME).join(paths::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    async fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: AppConfig = toml::from_str(&content)?;

        info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Reject values the rest of the application cannot use
    pub fn validate(&self) -> ConfigResult<()> {
        if self.ui.spinner_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "ui.spinner_interval".to_string(),
                value: "0s".to_string(),
                reason: "Interval must be greater than zero".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                value: self.logging.level.clone(),
                reason: format!("Expected one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Runtime HTTP client configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            request_timeout: self.client.request_timeout,
            connect_timeout: self.client.connect_timeout,
            user_agent: self.client.user_agent.clone(),
            api: self.api.clone(),
        }
    }

    /// Runtime orchestrator configuration for one session
    ///
    /// `interactive` is whether stderr is a terminal; the spinner is only
    /// drawn when it is and the config enables it.
    pub fn orchestrator_config(
        &self,
        destination: PathBuf,
        flags: DownloadFlags,
        all: bool,
        interactive: bool,
    ) -> OrchestratorConfig {
        OrchestratorConfig {
            destination,
            flags,
            all,
            spinner_interval: self.ui.spinner_interval,
            show_spinner: self.ui.spinner && interactive,
        }
    }
}
